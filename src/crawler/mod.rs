//! Comment crawling for Bilibili videos
//!
//! This module implements the retrieval side of the pipeline: extracting
//! the video identifier from a URL, fetching comment pages over the reply
//! API with politeness pacing, and collecting the results with a
//! partial-result failure policy.

pub mod fetcher;
pub mod pacing;
pub mod pipeline;
pub mod reply;
pub mod url;

pub use fetcher::{BiliFetcher, ReplyFetcher};
pub use pacing::{NoPacer, Pacer, RandomPacer};
pub use pipeline::{CommentPipeline, CrawlOutcome, StopReason};
pub use reply::{sort_comments, Comment};
pub use url::extract_bvid;
