use crate::app_config::AppConfig;
use crate::listing::JobSource;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("HIRESENSE_LOG_LEVEL", "info");
    let http_timeout_secs = parse_u64("HIRESENSE_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("HIRESENSE_USER_AGENT", "HireSense/1.0");
    let enabled_sources = parse_sources(
        "HIRESENSE_SOURCES",
        &or_default("HIRESENSE_SOURCES", "remoteok,remotive,arbeitnow"),
    )?;

    let remoteok_base_url = or_default("HIRESENSE_REMOTEOK_BASE_URL", "https://remoteok.com");
    let remotive_base_url = or_default("HIRESENSE_REMOTIVE_BASE_URL", "https://remotive.com");
    let arbeitnow_base_url =
        or_default("HIRESENSE_ARBEITNOW_BASE_URL", "https://www.arbeitnow.com");
    let remotive_limit = parse_u32("HIRESENSE_REMOTIVE_LIMIT", "200")?;
    let popular_tags_limit = parse_usize("HIRESENSE_POPULAR_TAGS_LIMIT", "15")?;

    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let gemini_model = or_default("GEMINI_MODEL", "gemini-1.5-flash-latest");
    let gemini_base_url = or_default(
        "GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com/v1beta",
    );

    Ok(AppConfig {
        log_level,
        http_timeout_secs,
        user_agent,
        enabled_sources,
        remoteok_base_url,
        remotive_base_url,
        arbeitnow_base_url,
        remotive_limit,
        popular_tags_limit,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
    })
}

/// Parse a comma-separated source list, dropping duplicates.
fn parse_sources(var: &str, raw: &str) -> Result<Vec<JobSource>, ConfigError> {
    let mut sources = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let source = part
            .parse::<JobSource>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
    if sources.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "at least one source is required".to_string(),
        });
    }
    Ok(sources)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
