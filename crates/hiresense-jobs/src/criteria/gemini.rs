use std::time::Duration;

use hiresense_core::AppConfig;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::{json, Value};

use super::{
    extract_json, fallback_criteria, map_to_standard_categories, prompts, sanitize_keywords,
    JobSearchCriteria,
};
use crate::error::JobsError;

const TEMPERATURE: f64 = 0.4;
const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`JobsError::MissingApiKey`] when `GEMINI_API_KEY` is unset,
    /// or [`JobsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, JobsError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .ok_or(JobsError::MissingApiKey)?;
        Self::with_base_url(
            api_key,
            &config.gemini_model,
            config.http_timeout_secs,
            &config.gemini_base_url,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`JobsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, JobsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint URL without the key, safe to log or put in errors.
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send one prompt and return the first candidate's text.
    ///
    /// # Errors
    ///
    /// - [`JobsError::Http`] on network failure.
    /// - [`JobsError::UnexpectedStatus`] on a non-2xx response.
    /// - [`JobsError::Deserialize`] if the body is not JSON.
    /// - [`JobsError::EmptyCompletion`] if no candidate carries text.
    pub async fn generate(&self, prompt: &str) -> Result<String, JobsError> {
        let endpoint = self.endpoint();
        let url = format!(
            "{endpoint}?key={}",
            utf8_percent_encode(&self.api_key, NON_ALPHANUMERIC)
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(JobsError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint,
            });
        }

        let raw = response.text().await?;
        let parsed: Value = serde_json::from_str(&raw).map_err(|e| JobsError::Deserialize {
            context: "gemini response".to_string(),
            source: e,
        })?;
        candidate_text(&parsed)
            .map(str::to_string)
            .ok_or(JobsError::EmptyCompletion)
    }

    /// Derive search criteria from a resume and profile.
    ///
    /// # Errors
    ///
    /// Any error from [`GeminiClient::generate`], or
    /// [`JobsError::Deserialize`] if the reply holds no criteria object.
    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        skills: &[String],
        target_role: Option<&str>,
    ) -> Result<JobSearchCriteria, JobsError> {
        let prompt = prompts::resume_criteria_prompt(resume_text, skills, target_role);
        let reply = self.generate(&prompt).await?;
        let criteria = parse_criteria(&reply)?;
        tracing::debug!(
            model = %self.model,
            keywords = criteria.keywords.len(),
            categories = criteria.categories.len(),
            "derived resume criteria"
        );
        Ok(criteria)
    }

    /// Like [`GeminiClient::analyze_resume`], but any failure is logged and
    /// replaced with [`fallback_criteria`].
    pub async fn analyze_resume_or_fallback(
        &self,
        resume_text: &str,
        skills: &[String],
        target_role: Option<&str>,
    ) -> JobSearchCriteria {
        match self.analyze_resume(resume_text, skills, target_role).await {
            Ok(criteria) => criteria,
            Err(e) => {
                tracing::warn!(
                    model = %self.model,
                    error = %e,
                    "resume analysis failed; using profile fallback"
                );
                fallback_criteria(skills, target_role)
            }
        }
    }
}

fn candidate_text(body: &Value) -> Option<&str> {
    body.get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

fn parse_criteria(reply: &str) -> Result<JobSearchCriteria, JobsError> {
    let mut criteria: JobSearchCriteria =
        serde_json::from_str(extract_json(reply)).map_err(|e| JobsError::Deserialize {
            context: "resume criteria".to_string(),
            source: e,
        })?;
    // Category defaults key off the categories as the model wrote them.
    criteria.keywords = sanitize_keywords(&criteria.keywords, &criteria.categories);
    criteria.categories = map_to_standard_categories(&criteria.categories);
    Ok(criteria)
}
