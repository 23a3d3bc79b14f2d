//! Command-line interface definitions.
//!
//! Two subcommands mirror the two pipeline stages. Defaults reproduce the
//! historical file layout, so `noticiero fetch` followed by
//! `noticiero transform` works without any flags.

use clap::{Parser, Subcommand};

/// Command-line arguments for noticiero.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch news headlines for every country and write the raw archive
    Fetch {
        /// Output path for the raw article archive
        #[arg(short, long, default_value = "news_articles.json")]
        output: String,

        /// Maximum number of articles to keep per country
        #[arg(short, long, default_value_t = 5)]
        max_results: usize,
    },
    /// Transform a raw archive into the bilingual reader feed
    Transform {
        /// Path of the archive written by `fetch`
        #[arg(short, long, default_value = "news_articles.json")]
        input: String,

        /// Output path for the reader feed
        #[arg(short, long, default_value = "public/data/news_by_country.json")]
        output: String,
    },
}
