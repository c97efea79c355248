//! HTTP fetcher for the Bilibili reply API
//!
//! This module provides the network boundary of the crawler:
//! - [`ReplyFetcher`] - capability trait the retrieval loop depends on,
//!   so tests can run against mock implementations
//! - [`BiliFetcher`] - reqwest-based implementation with User-Agent
//!   rotation, per-video Referer, optional Cookie credential, and a
//!   base-URL override for mock servers
//!
//! Each page is attempted exactly once; the retrieval loop treats any
//! failure as terminal for the session and keeps partial results.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

use crate::config::{Config, Credential};
use crate::crawler::reply::ReplyApiResponse;
use crate::error::FetchError;

/// Production endpoint of the reply API
const API_BASE: &str = "https://api.bilibili.com";

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Capability interface for fetching one page of replies
///
/// `cursor` is the opaque continuation value from the previous page
/// (0 starts a session).
#[async_trait]
pub trait ReplyFetcher: Send + Sync {
    /// Fetch a single reply page for `bvid` at `cursor`
    async fn fetch_page(&self, bvid: &str, cursor: u64) -> Result<ReplyApiResponse, FetchError>;
}

/// Bilibili reply API fetcher
pub struct BiliFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Optional authentication cookie (anonymous requests may see fewer replies)
    cookie: Option<Credential>,

    /// User agent override; the rotation pool is used when unset
    user_agent: Option<String>,

    /// Base URL override for testing with mock servers
    base_url: Option<String>,
}

impl BiliFetcher {
    /// Create a new fetcher from crawler configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_timeout(config.request_timeout(), config.crawler.cookie.clone())
            .map(|fetcher| Self {
                user_agent: config.crawler.user_agent.clone(),
                ..fetcher
            })
    }

    /// Create a new fetcher with an explicit timeout and credential
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_timeout(
        timeout: Duration,
        cookie: Option<Credential>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            cookie,
            user_agent: None,
            base_url: None,
        })
    }

    /// Create a new fetcher with a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut fetcher = Self::with_timeout(timeout, None)?;
        fetcher.base_url = Some(base_url.to_string());
        Ok(fetcher)
    }

    /// Build the reply API URL for one page
    ///
    /// Template: `/x/v2/reply/main?jsonp=jsonp&next={cursor}&type=1&oid={bvid}&mode=3&plat=1`
    /// (`mode=3` sorts by time, newest first).
    #[must_use]
    pub fn page_url(&self, bvid: &str, cursor: u64) -> String {
        let base = self.base_url.as_deref().unwrap_or(API_BASE);
        format!("{base}/x/v2/reply/main?jsonp=jsonp&next={cursor}&type=1&oid={bvid}&mode=3&plat=1")
    }

    /// Build request headers for one page
    ///
    /// The Referer points at the video page; the Cookie header is only
    /// present when a credential was configured.
    fn build_headers(&self, bvid: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        match &self.user_agent {
            Some(ua) => {
                if let Ok(value) = HeaderValue::from_str(ua) {
                    headers.insert(USER_AGENT, value);
                }
            }
            None => {
                headers.insert(USER_AGENT, HeaderValue::from_static(random_user_agent()));
            }
        }

        let referer = format!("https://www.bilibili.com/video/{bvid}");
        if let Ok(value) = HeaderValue::from_str(&referer) {
            headers.insert(REFERER, value);
        }

        if let Some(cookie) = &self.cookie {
            if let Ok(mut value) = HeaderValue::from_str(cookie.expose()) {
                value.set_sensitive(true);
                headers.insert(COOKIE, value);
            }
        }

        headers
    }
}

#[async_trait]
impl ReplyFetcher for BiliFetcher {
    async fn fetch_page(&self, bvid: &str, cursor: u64) -> Result<ReplyApiResponse, FetchError> {
        let url = self.page_url(bvid, cursor);
        let headers = self.build_headers(bvid);

        tracing::debug!(bvid = %bvid, cursor = %cursor, "Requesting reply page");

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: ReplyApiResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        parsed.ensure_ok()?;
        Ok(parsed)
    }
}

/// Get a random user agent from the pool
fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS.choose(&mut rng).unwrap_or(&USER_AGENTS[0])
}
