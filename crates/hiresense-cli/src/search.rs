//! Search and tag command handlers.

use hiresense_core::{AppConfig, JobSource, Listing};
use hiresense_jobs::{
    apply_filters, deep_search, fetch_all_jobs, match_score, popular_tags, rank_by_skills,
    JobBoardClient, JobFilters, JobSearchCriteria, SeenKeys,
};
use serde::Serialize;

use crate::criteria::{derive_criteria, read_resume};
use crate::{SearchArgs, TagsArgs};

/// Resume keywords used as the board query when none is typed.
const FETCH_QUERY_KEYWORDS: usize = 3;

fn selected_sources(config: &AppConfig, requested: &[JobSource]) -> Vec<JobSource> {
    if requested.is_empty() {
        config.enabled_sources.clone()
    } else {
        requested.to_vec()
    }
}

/// A listing with its skill score, as printed by `search --json`.
#[derive(Debug, Serialize)]
pub(crate) struct ScoredListing {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// Pair each listing with its [`match_score`]. Scores are omitted when no
/// skills are set.
pub(crate) fn scored_listings(listings: Vec<Listing>, skills: &[String]) -> Vec<ScoredListing> {
    let has_skills = skills.iter().any(|s| !s.trim().is_empty());
    listings
        .into_iter()
        .map(|listing| {
            let score = has_skills.then(|| match_score(&listing, skills));
            ScoredListing { listing, score }
        })
        .collect()
}

/// Query forwarded to the boards: the typed query, or the first few resume
/// keywords when the typed query is blank.
pub(crate) fn fetch_query(
    user_query: Option<&str>,
    criteria: Option<&JobSearchCriteria>,
) -> Option<String> {
    if let Some(query) = user_query.map(str::trim).filter(|q| !q.is_empty()) {
        return Some(query.to_string());
    }
    let keywords: Vec<&str> = criteria?
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .take(FETCH_QUERY_KEYWORDS)
        .collect();
    (!keywords.is_empty()).then(|| keywords.join(" "))
}

/// Skills to rank by: `--skill` values, then `--target-role`, then the
/// resume-derived skills. Duplicates are dropped ignoring case.
pub(crate) fn ranking_skills(
    skills: &[String],
    target_role: Option<&str>,
    criteria: Option<&JobSearchCriteria>,
) -> Vec<String> {
    let derived = criteria.map(JobSearchCriteria::match_skills).unwrap_or_default();
    let mut merged: Vec<String> = Vec::new();
    let candidates = skills
        .iter()
        .map(String::as_str)
        .chain(target_role)
        .chain(derived.iter().map(String::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty());
    for skill in candidates {
        if !merged.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            merged.push(skill.to_string());
        }
    }
    merged
}

async fn resume_criteria(
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<Option<JobSearchCriteria>> {
    let Some(path) = &args.resume else {
        return Ok(None);
    };
    let resume_text = read_resume(path)?;
    let criteria =
        derive_criteria(config, &resume_text, &args.skills, args.target_role.as_deref()).await;
    Ok(Some(criteria))
}

/// Fetch, deep search, filter and rank listings, then print the top
/// `--limit` as a table or JSON.
///
/// With `--resume` the criteria are derived first. Their keywords stand in
/// for a blank query when fetching, and their skills join the ranking.
/// Deep search only applies the typed query.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the resume cannot
/// be read, or JSON output fails. Individual board failures are logged and
/// skipped.
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let client = JobBoardClient::from_config(config)?;
    let sources = selected_sources(config, &args.sources);
    let criteria = resume_criteria(config, args).await?;
    let query = fetch_query(args.query.as_deref(), criteria.as_ref());

    let mut seen = SeenKeys::new();
    let listings = fetch_all_jobs(&client, &sources, query.as_deref(), &mut seen).await;
    let fetched = listings.len();

    let filters = JobFilters {
        job_type: args.job_type,
        location: args.location.clone().unwrap_or_default(),
        salary_min: args.salary_min,
        tags: args.tags.clone(),
    };
    let typed_query = args.query.as_deref().unwrap_or_default();
    let listings = apply_filters(deep_search(listings, typed_query), &filters);
    let skills = ranking_skills(&args.skills, args.target_role.as_deref(), criteria.as_ref());
    let mut listings = rank_by_skills(listings, &skills);

    tracing::info!(
        fetched,
        matched = listings.len(),
        skills = skills.len(),
        query = query.as_deref().unwrap_or_default(),
        "search complete"
    );
    listings.truncate(args.limit);
    let listings = scored_listings(listings, &skills);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    } else {
        print_listings(&listings);
    }
    Ok(())
}

/// Print the most frequent tags across fetched listings, one per line.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub(crate) async fn run_tags(config: &AppConfig, args: &TagsArgs) -> anyhow::Result<()> {
    let client = JobBoardClient::from_config(config)?;
    let sources = selected_sources(config, &args.sources);

    let mut seen = SeenKeys::new();
    let listings = fetch_all_jobs(&client, &sources, args.query.as_deref(), &mut seen).await;
    let tags = popular_tags(&listings, args.limit.unwrap_or(config.popular_tags_limit));

    if tags.is_empty() {
        println!("no tags found across {} listings", listings.len());
        return Ok(());
    }
    for tag in tags {
        println!("{tag}");
    }
    Ok(())
}

pub(crate) fn fmt_salary(min: Option<u64>, max: Option<u64>) -> String {
    let k = |v: u64| format!("{}k", v / 1000);
    match (min, max) {
        (Some(lo), Some(hi)) if lo != hi => format!("{}-{}", k(lo), k(hi)),
        (Some(v), _) | (None, Some(v)) => k(v),
        (None, None) => "-".to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

/// One table row. The SCORE column is present only for scored listings.
pub(crate) fn format_row(scored: &ScoredListing) -> String {
    let listing = &scored.listing;
    let score = scored
        .score
        .map(|s| format!("{s:<7}"))
        .unwrap_or_default();
    format!(
        "{score}{:<10}{:<12}{:<11}{:<22}{:<24}{}",
        listing.source.as_str(),
        listing.job_type.as_str(),
        fmt_salary(listing.salary_min, listing.salary_max),
        truncate(&listing.location, 18),
        truncate(&listing.company, 20),
        truncate(&listing.title, 60),
    )
}

fn print_listings(listings: &[ScoredListing]) {
    let Some(first) = listings.first() else {
        println!("no listings matched");
        return;
    };

    let score_header = if first.score.is_some() { "SCORE  " } else { "" };
    println!(
        "{score_header}{:<10}{:<12}{:<11}{:<22}{:<24}TITLE",
        "SOURCE", "TYPE", "SALARY", "LOCATION", "COMPANY"
    );
    for scored in listings {
        println!("{}", format_row(scored));
    }
}
