//! # Noticiero
//!
//! A two-stage batch pipeline that collects Spanish-language news headlines
//! per country and transforms them into bilingual reading practice material
//! for the NewsReader front-end.
//!
//! ## Stages
//!
//! 1. **fetch**: for each of 10 Spanish-speaking countries, query a
//!    web-search news provider across several phrasings and regions, keep
//!    results that pass a Spanish-word heuristic, deduplicate by title, and
//!    write the raw archive (`news_articles.json`)
//! 2. **transform**: read the archive, select up to three articles per
//!    country (preferring Spanish ones), split bodies into glossed sentence
//!    pairs, extract vocabulary, attach templated comprehension questions,
//!    and write the reader feed (`public/data/news_by_country.json`)
//!
//! The stages compose only through the archive file and are idempotent.
//!
//! ## Usage
//!
//! ```sh
//! noticiero fetch
//! noticiero transform
//! ```

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod lang;
mod models;
mod outputs;
mod search;
mod transformer;
mod utils;

use cli::{Cli, Command};
use search::NewsSearchClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Fetch { output, max_results } => {
            info!(max_results, "Fetching news articles for Spanish-speaking countries");
            let client = NewsSearchClient::new()?;
            let archive = collector::collect_all(&client, max_results).await;

            let total_articles: usize =
                archive.countries.values().map(|c| c.articles.len()).sum();
            info!(
                countries = archive.countries.len(),
                articles = total_articles,
                timestamp = %archive.timestamp,
                locale = %archive.locale,
                "Collection complete"
            );

            outputs::write_archive(&archive, &output).await?;
        }
        Command::Transform { input, output } => {
            info!("Transforming news archive into reader feed");
            transformer::run(&input, &output).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
