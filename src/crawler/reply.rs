//! Bilibili reply (comment) API payload structures
//!
//! The reply API returns JSON of the shape:
//!
//! ```json
//! {
//!   "code": 0,
//!   "data": {
//!     "replies": [ { "ctime": 1700000000, "content": { "message": "..." } } ],
//!     "cursor": { "next": 2, "is_end": false }
//!   }
//! }
//! ```
//!
//! All fields are deserialized tolerantly: absent sections become `None`
//! or defaults so that a truncated payload degrades to "end of data"
//! instead of a hard parse failure.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Root response from the reply API
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplyApiResponse {
    /// API status code (0 on success)
    #[serde(default)]
    pub code: i64,

    /// Human-readable status message
    #[serde(default)]
    pub message: String,

    /// Reply payload; absent on errors and past the end of data
    #[serde(default)]
    pub data: Option<ReplyData>,
}

impl ReplyApiResponse {
    /// Check the API's own status code
    ///
    /// A page that arrives with HTTP 200 but a non-zero `code` carries no
    /// usable data; it is reported as a malformed response.
    pub fn ensure_ok(&self) -> Result<(), FetchError> {
        if self.code != 0 {
            return Err(FetchError::MalformedResponse(format!(
                "API code {}: {}",
                self.code, self.message
            )));
        }
        Ok(())
    }
}

/// Reply payload containing the page of replies and pagination info
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplyData {
    /// Replies on this page, in server order; may be absent or empty
    #[serde(default)]
    pub replies: Option<Vec<RawReply>>,

    /// Continuation cursor; absent means no further pages
    #[serde(default)]
    pub cursor: Option<ReplyCursor>,
}

/// Continuation cursor returned with each page
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplyCursor {
    /// Cursor value for the next page; absent means the cursor is exhausted
    #[serde(default)]
    pub next: Option<u64>,

    /// Server-side end-of-data flag
    #[serde(default)]
    pub is_end: bool,
}

/// Raw reply entry from the API
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawReply {
    /// Creation time as a Unix timestamp (seconds)
    #[serde(default)]
    pub ctime: i64,

    /// Reply content wrapper
    #[serde(default)]
    pub content: ReplyContent,
}

/// Content wrapper holding the reply text
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplyContent {
    /// The reply message text
    #[serde(default)]
    pub message: String,
}

/// A collected comment record: creation time plus text
///
/// Immutable once created; one record per server-side reply entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Creation time in local time
    pub timestamp: DateTime<Local>,

    /// Raw comment text as received
    pub text: String,
}

impl Comment {
    /// Build a comment record from a raw reply entry
    #[must_use]
    pub fn from_raw(raw: &RawReply) -> Self {
        Self {
            timestamp: timestamp_to_datetime(raw.ctime),
            text: raw.content.message.clone(),
        }
    }

    /// Format the timestamp as a fixed-width `YYYY-MM-DD HH:MM:SS` string
    #[must_use]
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Convert a Unix timestamp (seconds) to local `DateTime`
///
/// Out-of-range timestamps fall back to the epoch rather than panicking.
fn timestamp_to_datetime(secs: i64) -> DateTime<Local> {
    Local
        .timestamp_opt(secs, 0)
        .single()
        .unwrap_or_else(|| Local.timestamp_opt(0, 0).unwrap())
}

/// Sort comments by timestamp descending, newest first
///
/// The sort is stable: records with equal timestamps keep their fetch
/// order, and re-sorting an already sorted sequence is a no-op.
pub fn sort_comments(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
