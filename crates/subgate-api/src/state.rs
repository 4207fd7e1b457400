//! Application state.

use std::sync::Arc;

use subgate_media::{HttpSubtitleFetcher, MetadataProvider, SubtitleFetcher, YtDlpProvider};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Holds only configuration and the two external capability objects; there
/// is no cross-request state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub provider: Arc<dyn MetadataProvider>,
    pub fetcher: Arc<dyn SubtitleFetcher>,
}

impl AppState {
    /// Create state with the real yt-dlp and HTTP collaborators.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let provider = YtDlpProvider::new(config.provider_timeout, config.cookies.clone());
        let fetcher = HttpSubtitleFetcher::new(config.fetch_timeout)?;

        Ok(Self {
            config,
            provider: Arc::new(provider),
            fetcher: Arc::new(fetcher),
        })
    }

    /// Create state with injected collaborators (used by tests).
    pub fn with_collaborators(
        config: ApiConfig,
        provider: Arc<dyn MetadataProvider>,
        fetcher: Arc<dyn SubtitleFetcher>,
    ) -> Self {
        Self {
            config,
            provider,
            fetcher,
        }
    }
}
