//! Multi-source fan-out and cross-source deduplication.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use hiresense_core::{JobSource, Listing};

use crate::sources::JobBoardClient;

/// Dedup keys already handed to the caller.
///
/// Owned by the caller and threaded through successive
/// [`fetch_all_jobs`] calls, so "load more" style paging never repeats a
/// listing. Call [`SeenKeys::reset`] before an unrelated query.
#[derive(Debug, Clone, Default)]
pub struct SeenKeys {
    keys: HashSet<String>,
}

impl SeenKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.keys.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn contains(&self, listing: &Listing) -> bool {
        self.keys.contains(&listing.dedup_key())
    }

    /// Records the listing's key. Returns `false` if it was already seen.
    pub fn insert(&mut self, listing: &Listing) -> bool {
        self.keys.insert(listing.dedup_key())
    }
}

/// Concatenate batches in order, keeping only the first listing for each
/// dedup key not already in `seen`.
pub fn dedup_listings<I>(batches: I, seen: &mut SeenKeys) -> Vec<Listing>
where
    I: IntoIterator<Item = Vec<Listing>>,
{
    batches
        .into_iter()
        .flatten()
        .filter(|listing| seen.insert(listing))
        .collect()
}

/// Fetch every requested source concurrently and merge the results.
///
/// Sources are merged in [`JobSource::ALL`] order whatever order `sources`
/// lists them in, and duplicates in `sources` are ignored. A failing source
/// contributes nothing (see [`JobBoardClient::fetch_source`]); the call
/// itself never fails. A blank `query` is treated as no query.
pub async fn fetch_all_jobs(
    client: &JobBoardClient,
    sources: &[JobSource],
    query: Option<&str>,
    seen: &mut SeenKeys,
) -> Vec<Listing> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let selected: Vec<JobSource> = JobSource::ALL
        .into_iter()
        .filter(|source| sources.contains(source))
        .collect();

    // Ordered buffering keeps batches in canonical source order.
    let batches: Vec<Vec<Listing>> = stream::iter(selected.iter().copied())
        .map(|source| client.fetch_source(source, query))
        .buffered(selected.len().max(1))
        .collect()
        .await;

    let fetched: usize = batches.iter().map(Vec::len).sum();
    let listings = dedup_listings(batches, seen);

    tracing::info!(
        sources = selected.len(),
        fetched,
        unique = listings.len(),
        seen = seen.len(),
        "aggregated job listings"
    );

    listings
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use hiresense_core::JobType;

    use super::*;

    fn listing(id: &str, title: &str, company: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            company_logo: None,
            description: String::new(),
            location: "Remote".to_string(),
            salary_min: None,
            salary_max: None,
            tags: Vec::new(),
            url: String::new(),
            posted_at: DateTime::from_timestamp(0, 0).unwrap(),
            source: JobSource::RemoteOk,
            job_type: JobType::FullTime,
            category: "Engineering".to_string(),
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_across_batches() {
        let mut seen = SeenKeys::new();
        let merged = dedup_listings(
            vec![
                vec![listing("rok-1", "Rust Dev", "Acme")],
                vec![
                    listing("rmv-1", "rust dev", "ACME"),
                    listing("rmv-2", "Go Dev", "Acme"),
                ],
            ],
            &mut seen,
        );
        let ids: Vec<&str> = merged.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["rok-1", "rmv-2"]);
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn dedup_skips_keys_seen_on_earlier_pages() {
        let mut seen = SeenKeys::new();
        let first = dedup_listings(vec![vec![listing("a", "Rust Dev", "Acme")]], &mut seen);
        let second = dedup_listings(
            vec![vec![
                listing("b", "Rust Dev", "Acme"),
                listing("c", "Go Dev", "Acme"),
            ]],
            &mut seen,
        );
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, "c");
    }

    #[test]
    fn reset_allows_listings_to_be_returned_again() {
        let batch = || vec![vec![listing("a", "Rust Dev", "Acme")]];
        let mut seen = SeenKeys::new();
        let first = dedup_listings(batch(), &mut seen);
        assert!(dedup_listings(batch(), &mut seen).is_empty());

        seen.reset();
        assert!(seen.is_empty());
        let again = dedup_listings(batch(), &mut seen);
        assert_eq!(first, again);
    }

    #[test]
    fn seen_keys_contains_reflects_inserts() {
        let mut seen = SeenKeys::new();
        let l = listing("a", "Rust Dev", "Acme");
        assert!(!seen.contains(&l));
        assert!(seen.insert(&l));
        assert!(seen.contains(&l));
        assert!(!seen.insert(&l));
    }
}
