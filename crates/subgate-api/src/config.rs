//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

use subgate_models::SelectionPolicy;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Bounded wait for one metadata provider invocation
    pub provider_timeout: Duration,
    /// Bounded wait for one outbound subtitle fetch
    pub fetch_timeout: Duration,
    /// Track selection policy
    pub policy: SelectionPolicy,
    /// Optional cookies file passed through to the provider
    pub cookies: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
            provider_timeout: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(30),
            policy: SelectionPolicy::default(),
            cookies: None,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            provider_timeout: Duration::from_secs(
                std::env::var("PROVIDER_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            fetch_timeout: Duration::from_secs(
                std::env::var("FETCH_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            policy: SelectionPolicy {
                format: std::env::var("FORMAT_POLICY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
                auto_scope: std::env::var("AUTO_SCOPE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            cookies: std::env::var("YTDLP_COOKIES").ok().map(PathBuf::from),
        }
    }
}
