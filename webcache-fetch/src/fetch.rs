//! HTTP fetcher implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

use webcache_core::config::FetchConfig;
use webcache_core::error::{Result, WebCacheError};
use webcache_core::traits::PageSource;

/// Fetches page text over HTTP(S).
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    config: FetchConfig,
    http_client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Creates a fetcher with custom configuration.
    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WebCacheError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    /// Issues a `GET` and returns the decoded body.
    ///
    /// Non-success statuses still return their body unless
    /// [`FetchConfig::error_for_status`] is set.
    #[instrument(skip(self))]
    async fn get_page(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| WebCacheError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self
            .http_client
            .get(parsed)
            .send()
            .await
            .map_err(|e| WebCacheError::HttpError(e.to_string()))?;

        let status = response.status();
        if self.config.error_for_status && !status.is_success() {
            return Err(WebCacheError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WebCacheError::HttpError(e.to_string()))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
