//! Shared domain types and configuration for HireSense.

pub mod app_config;
pub mod config;
pub mod listing;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{JobSource, JobType, JobTypeFilter, Listing, ParseEnumError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
