//! Resume criteria command handler.

use std::path::Path;

use anyhow::Context;
use hiresense_core::AppConfig;
use hiresense_jobs::{fallback_criteria, GeminiClient, JobSearchCriteria};

use crate::CriteriaArgs;

/// Read a plain-text resume from disk.
pub(crate) fn read_resume(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read resume {}", path.display()))
}

/// Derive criteria with the configured model, or from the profile alone
/// when no API key is set or the model call fails.
pub(crate) async fn derive_criteria(
    config: &AppConfig,
    resume_text: &str,
    skills: &[String],
    target_role: Option<&str>,
) -> JobSearchCriteria {
    match GeminiClient::from_config(config) {
        Ok(client) => {
            client
                .analyze_resume_or_fallback(resume_text, skills, target_role)
                .await
        }
        Err(e) => {
            tracing::warn!(error = %e, "resume analysis unavailable; using profile fallback");
            fallback_criteria(skills, target_role)
        }
    }
}

/// Print criteria derived from `--resume` as pretty JSON.
///
/// # Errors
///
/// Returns an error if the resume cannot be read or the criteria cannot be
/// serialized. Model failures fall back rather than erroring.
pub(crate) async fn run_criteria(config: &AppConfig, args: &CriteriaArgs) -> anyhow::Result<()> {
    let resume_text = read_resume(&args.resume)?;
    let criteria =
        derive_criteria(config, &resume_text, &args.skills, args.target_role.as_deref()).await;
    println!("{}", serde_json::to_string_pretty(&criteria)?);
    Ok(())
}
