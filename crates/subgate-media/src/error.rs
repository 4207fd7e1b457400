//! Error types for provider and subtitle operations.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while talking to the external collaborators or
/// reshaping their output.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("Provider failed: {message}")]
    Provider { message: String },

    #[error("Unparseable provider output: {0}")]
    Parse(String),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a provider failure carrying a diagnostic excerpt.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a parse failure.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a not-found failure.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a fetch failure.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }
}
