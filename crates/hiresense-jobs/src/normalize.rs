//! Field-level helpers shared by the per-source normalizers.
//!
//! Everything here is pure so each fallback rule can be tested without
//! touching the network. See [`crate::sources`] for how these compose into
//! full [`hiresense_core::Listing`] construction.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use hiresense_core::JobType;
use regex::Regex;

/// Category assigned when no rule in [`CATEGORY_RULES`] matches.
pub const DEFAULT_CATEGORY: &str = "Engineering";

/// Ordered `(category, pattern)` rules for [`infer_category`]. Patterns run
/// against lower-cased text and the first match wins.
pub const CATEGORY_RULES: &[(&str, &str)] = &[
    (
        "DevOps",
        r"devops|\bsre\b|infrastructure|cloud|\baws\b|azure|\bgcp\b",
    ),
    (
        "Data Science",
        r"data\s*scien|machine\s*learn|\bml\b|\bai\b|deep\s*learn",
    ),
    ("Design", r"design|\bui\s*/?\s*ux\b|figma|graphic"),
    ("Product", r"product\s*manag"),
    ("Marketing", r"market|\bseo\b|growth|content"),
    (
        "Frontend",
        r"front\s*end|react|vue|angular|\bcss\b|\bhtml\b|javascript|typescript",
    ),
    (
        "Backend",
        r"back\s*end|node|python|java|ruby|golang|rust|\bphp\b|django|flask",
    ),
    ("Full Stack", r"full\s*stack"),
    ("Mobile", r"mobile|\bios\b|android|flutter|react\s*native"),
    ("QA", r"\bqa\b|test|quality"),
    ("Security", r"security|cyber"),
    ("Sales", r"sales|account\s*exec"),
    ("Support", r"support|customer\s*success"),
];

static COMPILED_CATEGORY_RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CATEGORY_RULES
        .iter()
        .map(|&(category, pattern)| {
            (
                category,
                Regex::new(pattern).expect("valid category pattern"),
            )
        })
        .collect()
});

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script>|<style[^>]*>.*?</style>")
        .expect("valid script/style regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)</?[a-zA-Z!][^>]*>").expect("valid tags regex"));

static NUMERIC_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));").expect("valid numeric entity regex")
});

static SALARY_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*)(\s*[kK]\b)?").expect("valid salary number regex")
});

/// Infer a coarse category from tags and title using [`CATEGORY_RULES`].
#[must_use]
pub fn infer_category(tags: &[String], title: &str) -> &'static str {
    let mut text = tags.join(" ");
    text.push(' ');
    text.push_str(title);
    let text = text.to_lowercase();

    COMPILED_CATEGORY_RULES
        .iter()
        .find(|(_, re)| re.is_match(&text))
        .map_or(DEFAULT_CATEGORY, |(category, _)| *category)
}

/// Map a free-text employment type (`"Contract"`, `"part_time"`, ...) onto [`JobType`].
///
/// Absent or unrecognized values are treated as full time.
#[must_use]
pub fn map_job_type(raw: Option<&str>) -> JobType {
    let Some(raw) = raw else {
        return JobType::FullTime;
    };
    let lower = raw.to_lowercase();
    if lower.contains("contract") || lower.contains("freelance") {
        JobType::Contract
    } else if lower.contains("part") {
        JobType::PartTime
    } else if lower.contains("intern") {
        JobType::Internship
    } else {
        JobType::FullTime
    }
}

/// Extract `(min, max)` salary bounds from free text such as
/// `"$80,000 - $120,000"`, `"90k-110k USD"` or `"$50-70k"`.
///
/// The first number is the lower bound and the second the upper bound. A
/// `k` suffix multiplies by 1000; a bare lower bound under 1000 followed by
/// a `k` upper bound shares its suffix. Text with a single number yields
/// only a lower bound.
#[must_use]
pub fn parse_salary_bounds(text: Option<&str>) -> (Option<u64>, Option<u64>) {
    let Some(text) = text else {
        return (None, None);
    };

    let mut numbers = SALARY_NUMBER_RE.captures_iter(text).filter_map(|caps| {
        let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
        let value = digits.parse::<u64>().ok()?;
        Some((value, caps.get(2).is_some()))
    });

    let scale = |(value, thousands): (u64, bool)| {
        if thousands {
            value.checked_mul(1000)
        } else {
            Some(value)
        }
    };

    match (numbers.next(), numbers.next()) {
        (Some((lo, false)), Some(hi @ (_, true))) if lo < 1000 => {
            (lo.checked_mul(1000), scale(hi))
        }
        (min, max) => (min.and_then(scale), max.and_then(scale)),
    }
}

/// Strip HTML markup, returning the trimmed text content.
///
/// `<script>` and `<style>` bodies are dropped and common character entities
/// are decoded.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(html, "");
    let text = TAG_RE.replace_all(&without_scripts, "");
    decode_entities(&text).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    let numeric = NUMERIC_ENTITY_RE.replace_all(text, |caps: &regex::Captures<'_>| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            (None, None) => None,
        };
        code.and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    });

    // `&amp;` last so `&amp;lt;` decodes to the literal `&lt;`.
    numeric
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Parse an upstream timestamp: RFC 3339 first, then a naive
/// `YYYY-MM-DDTHH:MM:SS` (or space-separated) value taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Treat empty or whitespace-only strings as absent.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
