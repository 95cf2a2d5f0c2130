//! Remotive (`remotive.com/api/remote-jobs`) adapter.

use chrono::{DateTime, Utc};
use hiresense_core::{JobSource, Listing};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::fields::opt_string_or_number;
use super::random_id;
use crate::normalize::{
    infer_category, map_job_type, non_empty, parse_salary_bounds, parse_timestamp, strip_html,
};

const FALLBACK_LOCATION: &str = "Remote";

#[derive(Debug, Deserialize)]
pub(super) struct RemotiveResponse {
    #[serde(default)]
    pub(super) jobs: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotiveJob {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub company_logo_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub job_type: Option<String>,
    pub publication_date: Option<String>,
    pub candidate_required_location: Option<String>,
    /// Free text, e.g. `"$80,000 - $120,000"`.
    pub salary: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

pub(super) fn endpoint_url(base: &str, limit: u32, query: Option<&str>) -> String {
    match query {
        Some(q) => format!(
            "{base}/api/remote-jobs?limit={limit}&search={}",
            utf8_percent_encode(q, NON_ALPHANUMERIC)
        ),
        None => format!("{base}/api/remote-jobs?limit={limit}"),
    }
}

/// Normalize one Remotive posting. Returns `None` when `title` or
/// `company_name` is missing.
#[must_use]
pub fn normalize(job: RemotiveJob, now: DateTime<Utc>) -> Option<Listing> {
    let title = non_empty(job.title)?;
    let company = non_empty(job.company_name)?;
    let category = non_empty(job.category);

    let tags = match job.tags {
        Some(tags) if !tags.is_empty() => tags,
        _ => category.iter().cloned().collect(),
    };
    let category = category.unwrap_or_else(|| infer_category(&tags, &title).to_string());

    let (salary_min, salary_max) = parse_salary_bounds(job.salary.as_deref());
    let native_id = job.id.unwrap_or_else(random_id);

    Some(Listing {
        id: format!("{}-{native_id}", JobSource::Remotive.id_prefix()),
        company_logo: non_empty(job.company_logo_url),
        description: strip_html(job.description.as_deref().unwrap_or_default()),
        location: non_empty(job.candidate_required_location)
            .unwrap_or_else(|| FALLBACK_LOCATION.to_string()),
        salary_min,
        salary_max,
        url: job.url.unwrap_or_default(),
        posted_at: job
            .publication_date
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now),
        source: JobSource::Remotive,
        job_type: map_job_type(job.job_type.as_deref()),
        category,
        title,
        company,
        tags,
    })
}
