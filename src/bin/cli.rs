//! Job crawler CLI
//!
//! Local execution entry point. Drives a Chromium window through the
//! search results and prints the postings that pass the filters.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobcrawler::{
    browser::ChromeSession,
    error::Result,
    models::{Config, JobLink},
    pipeline,
    utils::SearchQuery,
};

/// jobcrawler - Job Listing Search Crawler
#[derive(Parser, Debug)]
#[command(
    name = "jobcrawler",
    version,
    about = "Walks job search results and prints the postings that match"
)]

struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the search and print matching postings
    Search {
        /// Stop after this many matches
        #[arg(short, long)]
        limit: Option<usize>,

        /// Override `search.keywords`
        #[arg(short, long)]
        keywords: Option<String>,

        /// Override `search.location`
        #[arg(long)]
        location: Option<String>,

        /// Print one JSON object per line
        #[arg(long, conflicts_with = "format")]
        json: bool,

        /// Output template with {link}, {title} and {company}
        #[arg(short, long, default_value = "{link}")]
        format: String,
    },

    /// Print the result page URL for the configured search
    Query {
        /// Geographic id to include
        #[arg(long)]
        geo_id: Option<String>,

        /// Index of the first result on the page
        #[arg(long, default_value_t = 0)]
        start: usize,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_link(link: &JobLink, json: bool, template: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(link)?);
    } else {
        println!("{}", link.format(template));
    }
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Search {
            limit,
            keywords,
            location,
            json,
            format,
        } => {
            if let Some(keywords) = keywords {
                config.search.keywords = keywords;
            }
            if let Some(location) = location {
                config.search.location = location;
            }
            config.validate()?;
            let criteria = config.criteria()?;

            let session = ChromeSession::launch(&config.browser).await?;
            let mut results = pipeline::search(session, criteria, &config)?;

            let mut printed = 0;
            let mut outcome = Ok(());
            while limit.is_none_or(|limit| printed < limit) {
                match results.next_match().await {
                    Some(Ok(link)) => {
                        print_link(&link, json, &format)?;
                        printed += 1;
                    }
                    Some(Err(e)) => {
                        outcome = Err(e);
                        break;
                    }
                    None => break,
                }
            }

            log::info!("Search summary:");
            for (key, value) in results.stats().summary_items() {
                log::info!("  {}: {}", key, value);
            }

            if let Err(e) = results.into_session().close().await {
                log::warn!("Browser did not shut down cleanly: {}", e);
            }
            outcome?;
        }

        Command::Query { geo_id, start } => {
            let criteria = config.criteria()?;
            let query = SearchQuery::new(&config.site.search_url, &criteria, geo_id.as_deref())?;
            println!("{}", query.url(start));
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            if let Err(e) = config.criteria() {
                log::error!("Search criteria are invalid: {}", e);
                return Err(e);
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
