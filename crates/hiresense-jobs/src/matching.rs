//! Skill-based relevance scoring and ranking.

use std::cmp::Reverse;

use hiresense_core::Listing;

/// Where in a listing a skill was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Body,
    Tag,
    Title,
}

impl MatchTier {
    /// Tiers from strongest to weakest; the first that matches is used.
    pub const ORDER: [MatchTier; 3] = [MatchTier::Title, MatchTier::Tag, MatchTier::Body];

    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            MatchTier::Title => 3,
            MatchTier::Tag => 2,
            MatchTier::Body => 1,
        }
    }
}

/// Pre-lowered listing fields so each skill is checked without re-allocating.
struct ScoringText {
    title: String,
    tags: Vec<String>,
    combined: String,
}

impl ScoringText {
    fn new(listing: &Listing) -> Self {
        let title = listing.title.to_lowercase();
        let tags: Vec<String> = listing.tags.iter().map(|t| t.to_lowercase()).collect();
        let combined = format!(
            "{} {} {} {}",
            title,
            tags.join(" "),
            listing.description.to_lowercase(),
            listing.category.to_lowercase()
        );
        Self {
            title,
            tags,
            combined,
        }
    }

    fn tier_for(&self, skill: &str) -> Option<MatchTier> {
        MatchTier::ORDER.into_iter().find(|tier| match tier {
            MatchTier::Title => self.title.contains(skill),
            MatchTier::Tag => self.tags.iter().any(|t| t.contains(skill)),
            MatchTier::Body => self.combined.contains(skill),
        })
    }
}

fn normalize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Strongest tier at which `skill` appears in `listing`, if any.
#[must_use]
pub fn match_tier(listing: &Listing, skill: &str) -> Option<MatchTier> {
    let skill = skill.trim().to_lowercase();
    if skill.is_empty() {
        return None;
    }
    ScoringText::new(listing).tier_for(&skill)
}

/// Sum of tier weights over `skills`: 3 for a title hit, 2 for a tag hit,
/// 1 for a hit anywhere else. Blank skills score nothing.
#[must_use]
pub fn match_score(listing: &Listing, skills: &[String]) -> u32 {
    let skills = normalize_skills(skills);
    if skills.is_empty() {
        return 0;
    }
    let text = ScoringText::new(listing);
    skills
        .iter()
        .filter_map(|skill| text.tier_for(skill))
        .map(MatchTier::weight)
        .sum()
}

/// Sort by descending [`match_score`], keeping input order among equal
/// scores. With no usable skills the input is returned as is.
#[must_use]
pub fn rank_by_skills(mut listings: Vec<Listing>, skills: &[String]) -> Vec<Listing> {
    if normalize_skills(skills).is_empty() {
        return listings;
    }
    listings.sort_by_cached_key(|listing| Reverse(match_score(listing, skills)));
    listings
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use hiresense_core::{JobSource, JobType};

    use super::*;

    fn listing(title: &str, tags: &[&str], description: &str) -> Listing {
        Listing {
            id: title.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            company_logo: None,
            description: description.to_string(),
            location: "Remote".to_string(),
            salary_min: None,
            salary_max: None,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            url: String::new(),
            posted_at: DateTime::from_timestamp(0, 0).unwrap(),
            source: JobSource::Arbeitnow,
            job_type: JobType::FullTime,
            category: String::new(),
        }
    }

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn ranks_title_then_tag_then_body() {
        let body = listing("X", &[], "backend work");
        let tag = listing("X", &["backend"], "");
        let title = listing("Backend Engineer", &["node"], "");
        let skill = skills(&["backend"]);

        assert_eq!(match_score(&title, &skill), 3);
        assert_eq!(match_score(&tag, &skill), 2);
        assert_eq!(match_score(&body, &skill), 1);

        let ranked = rank_by_skills(vec![body, tag, title], &skill);
        let titles: Vec<(&str, usize)> = ranked
            .iter()
            .map(|l| (l.title.as_str(), l.tags.len()))
            .collect();
        assert_eq!(titles, vec![("Backend Engineer", 1), ("X", 1), ("X", 0)]);
    }

    #[test]
    fn first_matching_tier_wins_per_skill() {
        // Present in title, tags and body: still counted once at title weight.
        let l = listing("Rust Engineer", &["rust"], "rust everywhere");
        assert_eq!(match_score(&l, &skills(&["rust"])), 3);
        assert_eq!(match_tier(&l, "RUST"), Some(MatchTier::Title));
    }

    #[test]
    fn tier_weights_are_monotonic() {
        let weights: Vec<u32> = MatchTier::ORDER.iter().map(|t| t.weight()).collect();
        assert!(weights.windows(2).all(|w| w[0] >= w[1]));
        assert!(MatchTier::Title > MatchTier::Tag && MatchTier::Tag > MatchTier::Body);
    }

    #[test]
    fn scores_sum_across_skills() {
        let l = listing("Rust Engineer", &["tokio"], "postgres");
        assert_eq!(match_score(&l, &skills(&["rust", "tokio", "postgres", "go "])), 6);
    }

    #[test]
    fn blank_skills_score_nothing() {
        let l = listing("Rust Engineer", &[], "");
        assert_eq!(match_score(&l, &skills(&["", "  "])), 0);
        assert_eq!(match_tier(&l, " "), None);
    }

    #[test]
    fn rank_without_skills_preserves_order() {
        let input = vec![listing("B", &[], ""), listing("A", &[], "")];
        assert_eq!(rank_by_skills(input.clone(), &[]), input);
        assert_eq!(rank_by_skills(input.clone(), &skills(&[" "])), input);
    }

    #[test]
    fn rank_is_stable_for_equal_scores() {
        let input = vec![
            listing("first", &[], ""),
            listing("Rust A", &[], ""),
            listing("second", &[], ""),
            listing("Rust B", &[], ""),
        ];
        let ranked = rank_by_skills(input, &skills(&["rust"]));
        let order: Vec<&str> = ranked.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(order, vec!["Rust A", "Rust B", "first", "second"]);
    }
}
