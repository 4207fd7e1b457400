//! Outbound subtitle fetching (proxy mode).

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::{MediaError, MediaResult};
use crate::provider::USER_AGENT;

/// Capability interface for fetching raw subtitle payloads.
#[async_trait]
pub trait SubtitleFetcher: Send + Sync {
    /// Fetch the raw payload at a previously resolved source URL.
    async fn fetch(&self, url: &str) -> MediaResult<String>;
}

/// reqwest backed fetcher with a browser user agent and bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpSubtitleFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpSubtitleFetcher {
    pub fn new(timeout: Duration) -> MediaResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MediaError::fetch(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    fn map_error(&self, e: reqwest::Error) -> MediaError {
        if e.is_timeout() {
            MediaError::Timeout(self.timeout_secs)
        } else {
            MediaError::fetch(e.to_string())
        }
    }
}

#[async_trait]
impl SubtitleFetcher for HttpSubtitleFetcher {
    async fn fetch(&self, url: &str) -> MediaResult<String> {
        info!("Fetching subtitle payload from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::fetch(format!("upstream returned {}", status)));
        }

        response.text().await.map_err(|e| self.map_error(e))
    }
}
