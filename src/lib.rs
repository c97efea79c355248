//! bilicmt - Bilibili comment crawler and word-frequency pipeline
//!
//! Scrapes the comments of a Bilibili video through the paginated reply
//! API, stores them as CSV, and turns the text into word frequencies for
//! plotting.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and credential handling
//! - [`crawler`] - Identifier extraction and the paginated retrieval loop
//! - [`analysis`] - Deduplication, word segmentation, frequency counting
//! - [`storage`] - CSV reading and writing
//! - [`commands`] - CLI command implementations
//!
//! # Example
//!
//! ```no_run
//! use bilicmt::config::Config;
//! use bilicmt::crawler::{extract_bvid, BiliFetcher, CommentPipeline, RandomPacer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let bvid = extract_bvid("https://www.bilibili.com/video/BV1yW421N7aH")?;
//!     let fetcher = BiliFetcher::new(&config)?;
//!     let pipeline = CommentPipeline::new(fetcher, RandomPacer::default(), 100);
//!     let outcome = pipeline.collect(&bvid).await;
//!     println!("collected {} comments", outcome.comments.len());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod commands;
pub mod config;
pub mod crawler;
pub mod error;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, Credential};
    pub use crate::crawler::{
        extract_bvid, BiliFetcher, Comment, CommentPipeline, CrawlOutcome, NoPacer, Pacer,
        RandomPacer, ReplyFetcher, StopReason,
    };
    pub use crate::error::{Error, ErrorCategory, Result};
}

// Direct re-exports for convenience
pub use crawler::{Comment, CrawlOutcome, StopReason};
