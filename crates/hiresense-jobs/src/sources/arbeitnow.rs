//! Arbeitnow (`arbeitnow.com/api/job-board-api`) adapter.
//!
//! The endpoint takes no search parameter, so queries are applied to the raw
//! postings after download.

use chrono::{DateTime, Utc};
use hiresense_core::{JobSource, JobType, Listing};
use serde::Deserialize;

use super::fields::opt_i64_lenient;
use super::random_id;
use crate::normalize::{infer_category, map_job_type, non_empty, strip_html};

const REMOTE_LOCATION: &str = "Remote";
const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Debug, Deserialize)]
pub(super) struct ArbeitnowResponse {
    #[serde(default)]
    pub(super) data: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArbeitnowJob {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub remote: Option<bool>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
    pub job_types: Option<Vec<String>>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "opt_i64_lenient")]
    pub created_at: Option<i64>,
}

pub(super) fn endpoint_url(base: &str) -> String {
    format!("{base}/api/job-board-api")
}

/// Case-insensitive substring match of `query` against title, description,
/// tags or company.
#[must_use]
pub fn matches_query(job: &ArbeitnowJob, query: &str) -> bool {
    let q = query.to_lowercase();
    let contains = |field: Option<&String>| field.is_some_and(|v| v.to_lowercase().contains(&q));

    contains(job.title.as_ref())
        || contains(job.description.as_ref())
        || contains(job.company_name.as_ref())
        || job
            .tags
            .iter()
            .flatten()
            .any(|tag| tag.to_lowercase().contains(&q))
}

/// Normalize one Arbeitnow posting. Returns `None` when `title` or
/// `company_name` is missing.
#[must_use]
pub fn normalize(job: ArbeitnowJob, now: DateTime<Utc>) -> Option<Listing> {
    let title = non_empty(job.title)?;
    let company = non_empty(job.company_name)?;
    let tags = job.tags.unwrap_or_default();
    let slug = non_empty(job.slug);

    let location = if job.remote == Some(true) {
        REMOTE_LOCATION.to_string()
    } else {
        non_empty(job.location).unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
    };

    let url = non_empty(job.url).unwrap_or_else(|| {
        format!(
            "https://www.arbeitnow.com/view/{}",
            slug.as_deref().unwrap_or_default()
        )
    });

    let job_type = job
        .job_types
        .as_ref()
        .and_then(|types| types.first())
        .map_or(JobType::FullTime, |t| map_job_type(Some(t.as_str())));

    let category = infer_category(&tags, &title).to_string();
    let native_id = slug.unwrap_or_else(random_id);

    Some(Listing {
        id: format!("{}-{native_id}", JobSource::Arbeitnow.id_prefix()),
        company_logo: None,
        description: strip_html(job.description.as_deref().unwrap_or_default()),
        location,
        salary_min: None,
        salary_max: None,
        url,
        posted_at: job
            .created_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(now),
        source: JobSource::Arbeitnow,
        job_type,
        category,
        title,
        company,
        tags,
    })
}
