//! HTTP client for loading a single listing page
//!
//! One GET per call. Failures are reported as-is; nothing is retried.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{JobprobeError, Result};
use crate::page::Page;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// Accept-Language header (default: "ro-RO,ro;q=0.9,ru;q=0.8,en;q=0.7")
    pub accept_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            accept_language: "ro-RO,ro;q=0.9,ru;q=0.8,en;q=0.7".to_string(),
        }
    }
}

/// HTTP client wrapper for fetching pages to inspect
pub struct PageClient {
    client: reqwest::Client,
}

impl PageClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        match reqwest::header::HeaderValue::from_str(&config.accept_language) {
            Ok(language) => {
                headers.insert(reqwest::header::ACCEPT_LANGUAGE, language);
            }
            Err(e) => warn!("Ignoring Accept-Language {:?}: {}", config.accept_language, e),
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(JobprobeError::HttpError)?;

        Ok(Self { client })
    }

    /// Fetch the HTML of `url`
    ///
    /// # Errors
    /// - `InvalidUrl` - URL is not absolute http(s)
    /// - `NotFound` - Server returned 404
    /// - `HttpStatus` - Any other non-success status
    /// - `HttpError` - Network errors
    pub async fn fetch(&self, url: &str) -> Result<String> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(JobprobeError::InvalidUrl(url.to_string()));
        }

        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(JobprobeError::HttpError)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(JobprobeError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(JobprobeError::HttpStatus(status.as_u16(), url.to_string()));
        }

        response.text().await.map_err(JobprobeError::HttpError)
    }

    /// Fetch and parse `url` into a [`Page`]
    pub async fn fetch_page(&self, url: &str) -> Result<Page> {
        let html = self.fetch(url).await?;
        Ok(Page::parse(url, &html))
    }
}
