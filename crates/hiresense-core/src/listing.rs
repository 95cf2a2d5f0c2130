//! The normalized job listing shared by every source adapter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One upstream job board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    RemoteOk,
    Remotive,
    Arbeitnow,
}

impl JobSource {
    /// Every source, in the order results are merged.
    pub const ALL: [JobSource; 3] = [
        JobSource::RemoteOk,
        JobSource::Remotive,
        JobSource::Arbeitnow,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobSource::RemoteOk => "remoteok",
            JobSource::Remotive => "remotive",
            JobSource::Arbeitnow => "arbeitnow",
        }
    }

    /// Prefix prepended to source-native ids so ids stay unique across sources.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            JobSource::RemoteOk => "rok",
            JobSource::Remotive => "rmv",
            JobSource::Arbeitnow => "abn",
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for JobSource {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        JobSource::ALL
            .into_iter()
            .find(|source| source.as_str() == lower)
            .ok_or_else(|| ParseEnumError {
                kind: "job source",
                value: s.to_string(),
            })
    }
}

/// Coarse employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    Contract,
    PartTime,
    Internship,
}

impl JobType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::Contract => "contract",
            JobType::PartTime => "part_time",
            JobType::Internship => "internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "full_time" => Ok(JobType::FullTime),
            "contract" => Ok(JobType::Contract),
            "part_time" => Ok(JobType::PartTime),
            "internship" => Ok(JobType::Internship),
            _ => Err(ParseEnumError {
                kind: "job type",
                value: s.to_string(),
            }),
        }
    }
}

/// Job-type criterion for [`Listing`] filtering. `All` disables the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobTypeFilter {
    #[default]
    All,
    Only(JobType),
}

impl JobTypeFilter {
    #[must_use]
    pub fn matches(self, job_type: JobType) -> bool {
        match self {
            JobTypeFilter::All => true,
            JobTypeFilter::Only(wanted) => wanted == job_type,
        }
    }
}

impl FromStr for JobTypeFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(JobTypeFilter::All);
        }
        s.parse::<JobType>().map(JobTypeFilter::Only)
    }
}

/// A job posting normalized from any [`JobSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Source-prefixed identifier, e.g. `rok-123456`.
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    /// Plain text; HTML is stripped during normalization.
    pub description: String,
    pub location: String,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub tags: Vec<String>,
    /// Canonical apply URL.
    pub url: String,
    pub posted_at: DateTime<Utc>,
    pub source: JobSource,
    pub job_type: JobType,
    pub category: String,
}

impl Listing {
    /// Lower-cased `title|company`, used to collapse the same posting seen
    /// on several boards.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", self.title.to_lowercase(), self.company.to_lowercase())
    }
}
