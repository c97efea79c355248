//! `fetch` command: crawl all comments of one video into a CSV file

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::crawler::{
    extract_bvid, sort_comments, BiliFetcher, CommentPipeline, RandomPacer, StopReason,
};
use crate::storage;

/// Fetch all comments for a video URL and write them to `output`
///
/// The video identifier is extracted from the URL (the only fatal error
/// here); the retrieval loop itself degrades to partial results on any
/// page failure. An empty result is reported as a warning and no file is
/// written.
pub async fn fetch(config: Config, url: String, output: PathBuf) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let bvid = extract_bvid(&url)?;
    tracing::info!(bvid = %bvid, "Extracted video id");

    println!("Fetching comments for {bvid}");
    println!("==========================");

    if config.crawler.cookie.is_none() {
        tracing::warn!("No BILICMT_COOKIE set; anonymous requests may return fewer comments");
    }

    let fetcher = BiliFetcher::new(&config).context("Failed to create fetcher")?;
    let (delay_min, delay_max) = config.delay_interval();
    let pacer = RandomPacer::new(delay_min, delay_max);
    let pipeline = CommentPipeline::new(fetcher, pacer, config.crawler.max_pages);

    let outcome = pipeline.collect(&bvid).await;

    match &outcome.stop_reason {
        StopReason::EndOfData => {
            tracing::info!(pages = %outcome.pages_fetched, "Reached end of comment data");
        }
        StopReason::PageCapReached => {
            tracing::info!(
                max_pages = %config.crawler.max_pages,
                "Stopped at page cap; more comments may exist"
            );
        }
        StopReason::RequestFailed(reason) => {
            tracing::warn!(
                reason = %reason,
                collected = %outcome.comments.len(),
                "Crawl ended early, writing partial results"
            );
        }
    }

    if outcome.comments.is_empty() {
        tracing::warn!(bvid = %bvid, "No comments collected, nothing to write");
        println!("No comments collected (the video may have none, or authentication is required)");
        return Ok(());
    }

    let mut comments = outcome.comments;
    sort_comments(&mut comments);

    storage::write_comments(&output, &comments)?;

    println!("Fetched {} comments over {} pages", comments.len(), outcome.pages_fetched);
    println!("Saved to {}", output.display());
    Ok(())
}
