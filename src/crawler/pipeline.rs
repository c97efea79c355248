//! Paginated comment retrieval loop
//!
//! [`CommentPipeline`] drives one retrieval session: starting from
//! cursor 0, it pauses, fetches a page, appends the page's replies, and
//! follows the continuation cursor until one of four stop conditions:
//!
//! - the server signals `is_end`
//! - the payload carries no continuation information (treated as end of data)
//! - the page cap is reached
//! - a request fails (network error, bad status, malformed payload)
//!
//! Failures are never propagated out of the loop: a failed page ends the
//! session and whatever was collected so far is returned (partial-result
//! policy). Pages are fetched strictly one at a time, and all session
//! state lives inside a single `collect` call.

use crate::crawler::fetcher::ReplyFetcher;
use crate::crawler::pacing::Pacer;
use crate::crawler::reply::{Comment, ReplyApiResponse};

/// Why a retrieval session stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Server signalled `is_end`, or the payload carried no continuation info
    EndOfData,

    /// The configured page cap was reached
    PageCapReached,

    /// A page request failed; the session kept its partial results
    RequestFailed(String),
}

/// Result of one retrieval session
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Collected comments in fetch order (within a page: server order;
    /// earlier pages before later pages)
    pub comments: Vec<Comment>,

    /// Number of pages successfully fetched
    pub pages_fetched: u32,

    /// Why the session stopped
    pub stop_reason: StopReason,
}

impl CrawlOutcome {
    /// Whether the session ended cleanly (end of data or page cap)
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !matches!(self.stop_reason, StopReason::RequestFailed(_))
    }
}

/// Comment retrieval pipeline over an injected fetcher and pacer
pub struct CommentPipeline<F, P> {
    fetcher: F,
    pacer: P,
    max_pages: u32,
}

impl<F: ReplyFetcher, P: Pacer> CommentPipeline<F, P> {
    /// Create a pipeline with a page cap
    ///
    /// A zero cap is clamped to one page so a session always makes progress.
    #[must_use]
    pub fn new(fetcher: F, pacer: P, max_pages: u32) -> Self {
        Self {
            fetcher,
            pacer,
            max_pages: max_pages.max(1),
        }
    }

    /// Retrieve all available comment pages for a video
    ///
    /// # Arguments
    ///
    /// * `bvid` - Video identifier (see [`crate::crawler::url::extract_bvid`])
    ///
    /// # Returns
    ///
    /// The collected comments (possibly empty) together with session stats
    /// and the stop reason. This call never fails; request failures end
    /// the session early with partial results.
    pub async fn collect(&self, bvid: &str) -> CrawlOutcome {
        let mut comments: Vec<Comment> = Vec::new();
        let mut cursor: u64 = 0;
        let mut pages_fetched: u32 = 0;

        let stop_reason = loop {
            if pages_fetched >= self.max_pages {
                tracing::info!(max_pages = %self.max_pages, "Page cap reached, stopping");
                break StopReason::PageCapReached;
            }

            self.pacer.pause().await;

            tracing::info!(
                bvid = %bvid,
                cursor = %cursor,
                page = %(pages_fetched + 1),
                "Fetching comment page"
            );

            let response = match self.fetcher.fetch_page(bvid, cursor).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(
                        bvid = %bvid,
                        cursor = %cursor,
                        error = %e,
                        collected = %comments.len(),
                        "Page request failed, keeping partial results"
                    );
                    break StopReason::RequestFailed(e.to_string());
                }
            };
            pages_fetched += 1;

            match append_page(&response, &mut comments) {
                // Continue from the next cursor value
                Some(next) => cursor = next,
                None => {
                    tracing::info!(
                        bvid = %bvid,
                        pages = %pages_fetched,
                        collected = %comments.len(),
                        "End of comment data"
                    );
                    break StopReason::EndOfData;
                }
            }

            tracing::info!(collected = %comments.len(), next_cursor = %cursor, "Page complete");
        };

        CrawlOutcome {
            comments,
            pages_fetched,
            stop_reason,
        }
    }
}

/// Append one page's replies and decide how to continue
///
/// Returns the next cursor value, or `None` when the page signals end of
/// data (explicit `is_end`, or missing cursor/continuation value). A page
/// with a live cursor but zero replies is a valid empty page: the
/// server's end flag is authoritative, and the page cap bounds a server
/// that never sets it.
fn append_page(response: &ReplyApiResponse, comments: &mut Vec<Comment>) -> Option<u64> {
    let data = response.data.as_ref()?;

    if let Some(replies) = &data.replies {
        comments.extend(replies.iter().map(Comment::from_raw));
    }

    let cursor = data.cursor.as_ref()?;
    if cursor.is_end {
        return None;
    }
    cursor.next
}
