//! JSON file writers for the archive and the reader feed.
//!
//! Both documents are written pretty-printed with 2-space indentation so
//! they stay diffable between runs. Parent directories are created on
//! demand; the reader feed's default path lives under `public/data/`.

use crate::models::{NewsArchive, ReaderFeed};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write the collector archive to `path`, replacing any previous run.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_archive(archive: &NewsArchive, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(archive)?;
    write_json(path, &json).await?;
    info!(
        countries = archive.countries.len(),
        bytes = json.len(),
        "Wrote news archive"
    );
    Ok(())
}

/// Write the reader feed to `path`, replacing any previous run.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_reader_feed(feed: &ReaderFeed, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(feed)?;
    write_json(path, &json).await?;
    info!(countries = feed.len(), bytes = json.len(), "Wrote reader feed");
    Ok(())
}

async fn write_json(path: &str, json: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, json).await?;
    Ok(())
}
