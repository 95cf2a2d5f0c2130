//! Job aggregation for HireSense.
//!
//! Fetches postings from RemoteOK, Remotive and Arbeitnow, normalizes them
//! into [`hiresense_core::Listing`], and provides search, filtering,
//! skill ranking, tag summaries and resume-derived search criteria.

pub mod aggregate;
pub mod criteria;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod search;
pub mod sources;
pub mod tags;

pub use aggregate::{dedup_listings, fetch_all_jobs, SeenKeys};
pub use criteria::{fallback_criteria, GeminiClient, JobSearchCriteria};
pub use error::JobsError;
pub use matching::{match_score, match_tier, rank_by_skills, MatchTier};
pub use search::{apply_filters, deep_search, JobFilters};
pub use sources::{JobBoardClient, RawListing, SourceBaseUrls};
pub use tags::{popular_tags, DEFAULT_POPULAR_TAGS};
