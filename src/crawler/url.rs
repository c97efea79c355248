//! Video identifier extraction from Bilibili URLs
//!
//! Every video page URL (and most share links) embeds a BV-style id,
//! e.g. `https://www.bilibili.com/video/BV1yW421N7aH/?share_source=copy_web`.
//! The comment API is keyed by that id, so this is the first step of a
//! fetch run and the only one whose failure aborts it.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ParseError;

/// Matches a BV id: the literal prefix `BV` (case-sensitive) followed by
/// one or more alphanumeric characters.
static BVID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"BV[0-9A-Za-z]+").unwrap());

/// Extract the first BV id from a URL string
///
/// # Arguments
///
/// * `url` - An arbitrary URL or URL-like string
///
/// # Errors
///
/// Returns [`ParseError::BvidNotFound`] with a hint about the expected URL
/// shape when no BV id is present.
///
/// # Examples
///
/// ```
/// use bilicmt::crawler::url::extract_bvid;
///
/// let bvid = extract_bvid("https://www.bilibili.com/video/BV1tCdUYPEdL/?p=1").unwrap();
/// assert_eq!(bvid, "BV1tCdUYPEdL");
/// ```
pub fn extract_bvid(url: &str) -> Result<String, ParseError> {
    BVID_REGEX
        .find(url)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParseError::BvidNotFound(url.to_string()))
}
