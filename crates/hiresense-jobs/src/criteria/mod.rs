//! Resume-derived job search criteria.
//!
//! [`GeminiClient::analyze_resume`] asks a generative-language model to read
//! a resume and return skills, keywords and target categories. The response
//! is cleaned by [`sanitize_keywords`] and [`map_to_standard_categories`].
//! When the model is unavailable, [`fallback_criteria`] builds criteria from
//! the profile alone.

mod gemini;
mod prompts;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use gemini::GeminiClient;

/// Canonical role categories the model is asked to map candidates onto.
pub const STANDARD_CATEGORIES: &[&str] = &[
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Mobile Developer",
    "DevOps Engineer",
    "Data Scientist",
    "Machine Learning Engineer",
    "Product Manager",
    "UI/UX Designer",
    "QA Engineer",
    "Cloud Architect",
    "Cybersecurity Analyst",
    "System Administrator",
    "Project Manager",
    "Business Analyst",
    "Marketing Specialist",
    "Sales Representative",
    "HR Specialist",
    "Customer Support",
    "Finance Analyst",
];

const MAX_KEYWORDS: usize = 20;
const MIN_KEYWORDS_BEFORE_DEFAULTS: usize = 5;

/// Filler words that carry no search signal on their own.
const STOP_WORDS: &[&str] = &[
    "and",
    "the",
    "for",
    "with",
    "knowledge",
    "experience",
    "working",
    "skills",
    "strong",
    "good",
    "ability",
    "proficient",
    "understanding",
    "familiarity",
    "preferred",
    "plus",
    "years",
    "environment",
    "team",
    "work",
    "communication",
];

/// Keywords added for thin keyword lists, keyed by a category substring.
const CATEGORY_DEFAULT_KEYWORDS: &[(&str, &[&str])] = &[
    ("Frontend", &["React", "JavaScript", "CSS"]),
    ("Backend", &["Node.js", "API", "Database"]),
    ("Data", &["Python", "SQL", "Analytics"]),
];

static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid fence regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSearchCriteria {
    pub keywords: Vec<String>,
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub categories: Vec<String>,
    pub experience_level: String,
    pub preferred_locations: Vec<String>,
    pub salary_expectation: String,
    pub industry_preferences: Vec<String>,
}

impl JobSearchCriteria {
    /// Skills followed by keywords, deduplicated case-insensitively, ready
    /// for [`crate::rank_by_skills`].
    #[must_use]
    pub fn match_skills(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.skills
            .iter()
            .chain(&self.keywords)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

/// Pull the JSON payload out of a model reply.
///
/// Prefers a fenced code block whose body starts with `{` or `[`. Otherwise
/// takes the outermost array when `[` appears before `{`, else the outermost
/// object. Falls back to the trimmed text.
#[must_use]
pub fn extract_json(text: &str) -> &str {
    if let Some(body) = FENCED_JSON_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
    {
        if body.starts_with('{') || body.starts_with('[') {
            return body;
        }
    }

    let first_brace = text.find('{');
    let first_bracket = text.find('[');

    let array_first = match (first_bracket, first_brace) {
        (Some(bracket), Some(brace)) => bracket < brace,
        (Some(_), None) => true,
        _ => false,
    };

    if array_first {
        if let Some(slice) = outermost(text, '[', ']') {
            return slice;
        }
    }
    outermost(text, '{', '}').unwrap_or_else(|| text.trim())
}

fn outermost(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Drop short and filler keywords, dedupe, top up thin lists with
/// category defaults, and cap the result at 20 entries.
#[must_use]
pub fn sanitize_keywords(keywords: &[String], categories: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut refined: Vec<String> = Vec::new();
    let mut push = |keyword: &str, refined: &mut Vec<String>| {
        if seen.insert(keyword.to_lowercase()) {
            refined.push(keyword.to_string());
        }
    };

    for keyword in keywords {
        let trimmed = keyword.trim();
        let lower = trimmed.to_lowercase();
        if lower.chars().count() <= 2 || STOP_WORDS.contains(&lower.as_str()) {
            continue;
        }
        push(trimmed, &mut refined);
    }

    if refined.len() < MIN_KEYWORDS_BEFORE_DEFAULTS {
        for category in categories {
            for &(needle, defaults) in CATEGORY_DEFAULT_KEYWORDS {
                if category.contains(needle) {
                    for &keyword in defaults {
                        push(keyword, &mut refined);
                    }
                }
            }
        }
    }

    refined.truncate(MAX_KEYWORDS);
    refined
}

/// Map each category onto the first [`STANDARD_CATEGORIES`] entry that
/// contains it or is contained by it, case-insensitively. Unmatched
/// categories pass through unchanged.
#[must_use]
pub fn map_to_standard_categories(categories: &[String]) -> Vec<String> {
    categories
        .iter()
        .map(|category| {
            let lower = category.trim().to_lowercase();
            if lower.is_empty() {
                return category.clone();
            }
            STANDARD_CATEGORIES
                .iter()
                .find(|standard| {
                    let standard = standard.to_lowercase();
                    standard.contains(&lower) || lower.contains(&standard)
                })
                .map_or_else(|| category.clone(), |standard| (*standard).to_string())
        })
        .collect()
}

/// Criteria built from profile data alone, used when the model call fails.
#[must_use]
pub fn fallback_criteria(skills: &[String], target_role: Option<&str>) -> JobSearchCriteria {
    let keywords = if skills.is_empty() {
        vec!["developer".to_string()]
    } else {
        skills.to_vec()
    };
    JobSearchCriteria {
        keywords,
        roles: target_role
            .filter(|r| !r.trim().is_empty())
            .map(|r| vec![r.to_string()])
            .unwrap_or_default(),
        skills: skills.to_vec(),
        categories: Vec::new(),
        experience_level: "mid".to_string(),
        preferred_locations: vec!["Remote".to_string()],
        salary_expectation: String::new(),
        industry_preferences: Vec::new(),
    }
}

#[cfg(test)]
#[path = "criteria_test.rs"]
mod tests;
