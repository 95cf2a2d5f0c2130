mod criteria;
mod search;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hiresense_core::{JobSource, JobTypeFilter};
use tracing_subscriber::EnvFilter;

const DEFAULT_RESULT_LIMIT: usize = 25;

#[derive(Debug, Parser)]
#[command(name = "hiresense")]
#[command(about = "Aggregate, search and rank remote job listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch listings from every enabled board, then search, filter and rank them
    Search(SearchArgs),
    /// Show the most frequent tags across fetched listings
    Tags(TagsArgs),
    /// Derive job search criteria from a resume
    Criteria(CriteriaArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Free-text query; every whitespace-separated term must match.
    /// With --resume and no query, the top resume keywords are sent to the boards
    query: Option<String>,

    /// Restrict to a board (repeatable): remoteok, remotive, arbeitnow
    #[arg(long = "source", value_name = "SOURCE")]
    sources: Vec<JobSource>,

    /// Employment type: all, full_time, part_time, contract, internship
    #[arg(long, default_value = "all")]
    job_type: JobTypeFilter,

    /// Case-insensitive location substring
    #[arg(long)]
    location: Option<String>,

    /// Minimum acceptable upper salary bound
    #[arg(long)]
    salary_min: Option<u64>,

    /// Require any of these tags (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Rank by these skills (repeatable)
    #[arg(long = "skill", value_name = "SKILL")]
    skills: Vec<String>,

    /// Resume text file whose derived skills are added to the ranking
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Target role passed to resume analysis and added to the ranking skills
    #[arg(long)]
    target_role: Option<String>,

    /// Maximum number of listings to print
    #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
    limit: usize,

    /// Print listings as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TagsArgs {
    /// Optional query forwarded to the boards
    query: Option<String>,

    /// Restrict to a board (repeatable)
    #[arg(long = "source", value_name = "SOURCE")]
    sources: Vec<JobSource>,

    /// Number of tags to show (defaults to HIRESENSE_POPULAR_TAGS_LIMIT)
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Debug, Args)]
struct CriteriaArgs {
    /// Resume text file
    #[arg(long)]
    resume: PathBuf,

    /// Profile skill (repeatable)
    #[arg(long = "skill", value_name = "SKILL")]
    skills: Vec<String>,

    /// Role the candidate is aiming for
    #[arg(long)]
    target_role: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = hiresense_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args).await?,
        Commands::Tags(args) => search::run_tags(&config, &args).await?,
        Commands::Criteria(args) => criteria::run_criteria(&config, &args).await?,
    }

    Ok(())
}
