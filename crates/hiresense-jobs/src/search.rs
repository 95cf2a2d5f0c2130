//! Free-text deep search and structured filters over listings.

use hiresense_core::{JobTypeFilter, Listing};

/// Lower-cased concatenation of every searchable field.
fn haystack(listing: &Listing) -> String {
    let mut text = [
        listing.title.as_str(),
        listing.company.as_str(),
        listing.description.as_str(),
        listing.location.as_str(),
        listing.category.as_str(),
    ]
    .join(" ");
    for tag in &listing.tags {
        text.push(' ');
        text.push_str(tag);
    }
    text.to_lowercase()
}

/// Keep listings containing every whitespace-separated term of `query`.
///
/// Terms are matched as case-insensitive substrings of the combined title,
/// company, description, location, category and tags. A blank query returns
/// `listings` unchanged.
#[must_use]
pub fn deep_search(mut listings: Vec<Listing>, query: &str) -> Vec<Listing> {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return listings;
    }

    listings.retain(|listing| {
        let text = haystack(listing);
        terms.iter().all(|term| text.contains(term))
    });
    listings
}

/// Structured listing criteria. The default applies no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub job_type: JobTypeFilter,
    /// Case-insensitive substring of [`Listing::location`]; empty disables.
    pub location: String,
    /// Minimum acceptable upper salary bound; `None` or `0` disables.
    pub salary_min: Option<u64>,
    /// Listings must match at least one of these against their tags, title
    /// or category; empty disables.
    pub tags: Vec<String>,
}

impl JobFilters {
    fn matches(&self, listing: &Listing, location: &str, tags: &[String]) -> bool {
        if !self.job_type.matches(listing.job_type) {
            return false;
        }

        if !location.is_empty() && !listing.location.to_lowercase().contains(location) {
            return false;
        }

        if let Some(floor) = self.salary_min.filter(|&n| n > 0) {
            if listing.salary_max.is_none_or(|max| max < floor) {
                return false;
            }
        }

        if !tags.is_empty() {
            let title = listing.title.to_lowercase();
            let category = listing.category.to_lowercase();
            let listing_tags: Vec<String> =
                listing.tags.iter().map(|t| t.to_lowercase()).collect();
            let hit = tags.iter().any(|wanted| {
                listing_tags.iter().any(|t| t.contains(wanted.as_str()))
                    || title.contains(wanted.as_str())
                    || category.contains(wanted.as_str())
            });
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Apply every active criterion in `filters`; a listing must pass all of them.
#[must_use]
pub fn apply_filters(mut listings: Vec<Listing>, filters: &JobFilters) -> Vec<Listing> {
    let location = filters.location.trim().to_lowercase();
    let tags: Vec<String> = filters
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    listings.retain(|listing| filters.matches(listing, &location, &tags));
    listings
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
