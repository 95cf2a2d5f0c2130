//! RemoteOK (`remoteok.com/api`) adapter.

use chrono::{DateTime, Utc};
use hiresense_core::{JobSource, JobType, Listing};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use super::fields::{opt_i64_lenient, opt_string_or_number, opt_u64_lenient};
use crate::normalize::{infer_category, non_empty, parse_timestamp, strip_html};

const FALLBACK_LOCATION: &str = "Remote";

/// One element of the RemoteOK array. Every field is optional: the first
/// element of the feed is a legal notice with none of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteOkItem {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_i64_lenient")]
    pub epoch: Option<i64>,
    pub slug: Option<String>,
    pub company: Option<String>,
    pub company_logo: Option<String>,
    pub logo: Option<String>,
    pub position: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_u64_lenient")]
    pub salary_min: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_lenient")]
    pub salary_max: Option<u64>,
    pub tags: Option<Vec<String>>,
    pub url: Option<String>,
    pub date: Option<String>,
}

/// `{base}/api`, with `?tag=<query>` when a query is given.
pub(super) fn endpoint_url(base: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!(
            "{base}/api?tag={}",
            utf8_percent_encode(q, NON_ALPHANUMERIC)
        ),
        None => format!("{base}/api"),
    }
}

/// The feed is a JSON array whose first element is a legal notice.
pub(super) fn skip_legal_notice<T>(items: Vec<T>) -> Vec<T> {
    items.into_iter().skip(1).collect()
}

/// Normalize one RemoteOK posting. Returns `None` when `id`, `position` or
/// `company` is missing.
#[must_use]
pub fn normalize(item: RemoteOkItem, now: DateTime<Utc>) -> Option<Listing> {
    let id = item.id?;
    let title = non_empty(item.position)?;
    let company = non_empty(item.company)?;
    let tags = item.tags.unwrap_or_default();

    let url = non_empty(item.url).unwrap_or_else(|| {
        let path = item.slug.as_deref().unwrap_or(&id);
        format!("https://remoteok.com/remote-jobs/{path}")
    });

    let posted_at = item
        .date
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| item.epoch.and_then(|secs| DateTime::from_timestamp(secs, 0)))
        .unwrap_or(now);

    let category = infer_category(&tags, &title).to_string();

    Some(Listing {
        id: format!("{}-{id}", JobSource::RemoteOk.id_prefix()),
        company_logo: non_empty(item.company_logo).or_else(|| non_empty(item.logo)),
        description: strip_html(item.description.as_deref().unwrap_or_default()),
        location: non_empty(item.location).unwrap_or_else(|| FALLBACK_LOCATION.to_string()),
        salary_min: item.salary_min,
        salary_max: item.salary_max,
        url,
        posted_at,
        source: JobSource::RemoteOk,
        job_type: JobType::FullTime,
        category,
        title,
        company,
        tags,
    })
}
