//! Tag frequency summary for quick-filter chips.

use std::collections::HashMap;

use hiresense_core::Listing;

pub const DEFAULT_POPULAR_TAGS: usize = 15;

/// The `limit` most frequent lower-cased tags, most frequent first.
/// Ties keep the order in which tags were first seen.
#[must_use]
pub fn popular_tags(listings: &[Listing], limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tag in listings.iter().flat_map(|l| &l.tags) {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }
        if let Some(&i) = index.get(&tag) {
            counts[i].1 += 1;
        } else {
            index.insert(tag.clone(), counts.len());
            counts.push((tag, 1));
        }
    }

    // Stable sort keeps first-seen order within equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(tag, _)| tag).collect()
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use hiresense_core::{JobSource, JobType};

    use super::*;

    fn with_tags(tags: &[&str]) -> Listing {
        Listing {
            id: "id".to_string(),
            title: "t".to_string(),
            company: "c".to_string(),
            company_logo: None,
            description: String::new(),
            location: String::new(),
            salary_min: None,
            salary_max: None,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            url: String::new(),
            posted_at: DateTime::from_timestamp(0, 0).unwrap(),
            source: JobSource::RemoteOk,
            job_type: JobType::FullTime,
            category: String::new(),
        }
    }

    #[test]
    fn counts_case_insensitively_and_sorts_by_frequency() {
        let listings = vec![
            with_tags(&["Rust", "remote"]),
            with_tags(&["rust", "go"]),
            with_tags(&["RUST", "Go"]),
        ];
        assert_eq!(popular_tags(&listings, 10), vec!["rust", "go", "remote"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let listings = vec![with_tags(&["b", "a"]), with_tags(&["c", "a", "b"])];
        assert_eq!(popular_tags(&listings, 10), vec!["b", "a", "c"]);
    }

    #[test]
    fn respects_limit() {
        let listings = vec![with_tags(&["a", "b", "c", "d"])];
        assert_eq!(popular_tags(&listings, 2), vec!["a", "b"]);
        assert!(popular_tags(&listings, 0).is_empty());
    }

    #[test]
    fn empty_input_and_blank_tags_yield_nothing() {
        assert!(popular_tags(&[], DEFAULT_POPULAR_TAGS).is_empty());
        assert!(popular_tags(&[with_tags(&["", "  "])], DEFAULT_POPULAR_TAGS).is_empty());
    }
}
