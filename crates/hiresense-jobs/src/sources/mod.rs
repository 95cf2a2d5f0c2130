//! Job-board source adapters.
//!
//! Each board's payload is decoded into its own raw type, wrapped in
//! [`RawListing`], and normalized by that board's `normalize` function.
//! [`JobBoardClient::fetch_source`] never fails: network, status and parse
//! errors are logged and the source contributes nothing.

mod arbeitnow;
mod fields;
mod remoteok;
mod remotive;

use std::time::Duration;

use chrono::{DateTime, Utc};
use hiresense_core::{AppConfig, JobSource, Listing};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::JobsError;

pub use arbeitnow::ArbeitnowJob;
pub use remoteok::RemoteOkItem;
pub use remotive::RemotiveJob;

/// A posting as decoded from one board, before normalization.
#[derive(Debug, Clone)]
pub enum RawListing {
    RemoteOk(RemoteOkItem),
    Remotive(RemotiveJob),
    Arbeitnow(ArbeitnowJob),
}

impl RawListing {
    #[must_use]
    pub fn source(&self) -> JobSource {
        match self {
            RawListing::RemoteOk(_) => JobSource::RemoteOk,
            RawListing::Remotive(_) => JobSource::Remotive,
            RawListing::Arbeitnow(_) => JobSource::Arbeitnow,
        }
    }

    /// Map into a [`Listing`]. `now` stands in for postings without a usable
    /// timestamp. Returns `None` when required fields are missing.
    #[must_use]
    pub fn normalize(self, now: DateTime<Utc>) -> Option<Listing> {
        match self {
            RawListing::RemoteOk(item) => remoteok::normalize(item, now),
            RawListing::Remotive(job) => remotive::normalize(job, now),
            RawListing::Arbeitnow(job) => arbeitnow::normalize(job, now),
        }
    }
}

/// Base URLs for each board, without trailing slash.
#[derive(Debug, Clone)]
pub struct SourceBaseUrls {
    pub remoteok: String,
    pub remotive: String,
    pub arbeitnow: String,
}

/// HTTP client for the three public job boards.
///
/// Use [`JobBoardClient::from_config`] to honour [`AppConfig`], or
/// [`JobBoardClient::with_base_urls`] to point at a mock server in tests.
pub struct JobBoardClient {
    client: Client,
    base_urls: SourceBaseUrls,
    remotive_limit: u32,
}

impl JobBoardClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`JobsError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`JobsError::InvalidBaseUrl`] if a configured base URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, JobsError> {
        Self::with_base_urls(
            config.http_timeout_secs,
            &config.user_agent,
            config.remotive_limit,
            SourceBaseUrls {
                remoteok: config.remoteok_base_url.clone(),
                remotive: config.remotive_base_url.clone(),
                arbeitnow: config.arbeitnow_base_url.clone(),
            },
        )
    }

    /// Creates a client with explicit base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`JobsError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`JobsError::InvalidBaseUrl`] if a base URL does not parse.
    pub fn with_base_urls(
        timeout_secs: u64,
        user_agent: &str,
        remotive_limit: u32,
        base_urls: SourceBaseUrls,
    ) -> Result<Self, JobsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_urls = SourceBaseUrls {
            remoteok: normalize_base_url(&base_urls.remoteok)?,
            remotive: normalize_base_url(&base_urls.remotive)?,
            arbeitnow: normalize_base_url(&base_urls.arbeitnow)?,
        };

        Ok(Self {
            client,
            base_urls,
            remotive_limit,
        })
    }

    /// Fetches and normalizes one board's listings.
    ///
    /// Never fails: any error is logged at `warn` and yields an empty `Vec`,
    /// so one unreliable board cannot sink an aggregate query.
    pub async fn fetch_source(&self, source: JobSource, query: Option<&str>) -> Vec<Listing> {
        match self.fetch_raw(source, query).await {
            Ok(raw) => {
                let now = Utc::now();
                let fetched = raw.len();
                let listings: Vec<Listing> =
                    raw.into_iter().filter_map(|r| r.normalize(now)).collect();
                tracing::debug!(
                    source = source.as_str(),
                    fetched,
                    kept = listings.len(),
                    "normalized source listings"
                );
                listings
            }
            Err(e) => {
                tracing::warn!(
                    source = source.as_str(),
                    error = %e,
                    "job source fetch failed"
                );
                Vec::new()
            }
        }
    }

    /// Fetches one board's raw postings without normalizing them.
    ///
    /// Elements that do not decode as the board's posting type are skipped
    /// individually; only an undecodable envelope fails the call.
    ///
    /// # Errors
    ///
    /// - [`JobsError::Http`] on network failure.
    /// - [`JobsError::UnexpectedStatus`] on a non-2xx response.
    /// - [`JobsError::Deserialize`] if the body is not the expected JSON envelope.
    pub async fn fetch_raw(
        &self,
        source: JobSource,
        query: Option<&str>,
    ) -> Result<Vec<RawListing>, JobsError> {
        match source {
            JobSource::RemoteOk => {
                let url = remoteok::endpoint_url(&self.base_urls.remoteok, query);
                let items: Vec<serde_json::Value> = self.get_json(&url, "remoteok").await?;
                let items = remoteok::skip_legal_notice(items);
                Ok(decode_items::<RemoteOkItem>(items, source)
                    .into_iter()
                    .map(RawListing::RemoteOk)
                    .collect())
            }
            JobSource::Remotive => {
                let url =
                    remotive::endpoint_url(&self.base_urls.remotive, self.remotive_limit, query);
                let body: remotive::RemotiveResponse = self.get_json(&url, "remotive").await?;
                Ok(decode_items::<RemotiveJob>(body.jobs, source)
                    .into_iter()
                    .map(RawListing::Remotive)
                    .collect())
            }
            JobSource::Arbeitnow => {
                let url = arbeitnow::endpoint_url(&self.base_urls.arbeitnow);
                let body: arbeitnow::ArbeitnowResponse = self.get_json(&url, "arbeitnow").await?;
                Ok(decode_items::<ArbeitnowJob>(body.data, source)
                    .into_iter()
                    .filter(|job| query.is_none_or(|q| arbeitnow::matches_query(job, q)))
                    .map(RawListing::Arbeitnow)
                    .collect())
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, JobsError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| JobsError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Decode each JSON element independently, dropping the ones that do not fit.
fn decode_items<T: DeserializeOwned>(items: Vec<serde_json::Value>, source: JobSource) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(
                    source = source.as_str(),
                    error = %e,
                    "skipping undecodable posting"
                );
                None
            }
        })
        .collect()
}

fn normalize_base_url(raw: &str) -> Result<String, JobsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| JobsError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

/// Fallback native id for postings that carry none.
pub(crate) fn random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
