//! External metadata provider.
//!
//! The real implementation shells out to yt-dlp. The capability trait keeps
//! the request handlers testable with in-memory fakes.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use subgate_models::{VideoMetadata, VideoReference};

use crate::error::{MediaError, MediaResult};

/// Browser user agent sent to upstream services.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Capability interface for the external metadata provider.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the metadata document for a video reference.
    async fn fetch_metadata(&self, video: &VideoReference) -> MediaResult<VideoMetadata>;

    /// Materialize one subtitle file for a video and return its contents.
    ///
    /// `format` is the subtitle format requested from the provider (vtt).
    async fn fetch_subtitle(
        &self,
        video: &VideoReference,
        lang: &str,
        format: &str,
    ) -> MediaResult<String>;
}

/// yt-dlp backed metadata provider.
#[derive(Debug, Clone)]
pub struct YtDlpProvider {
    /// Bounded wait for one provider invocation; exceeded waits are terminal
    timeout: Duration,
    /// Optional Netscape cookies file passed through to yt-dlp
    cookies: Option<PathBuf>,
}

impl YtDlpProvider {
    pub fn new(timeout: Duration, cookies: Option<PathBuf>) -> Self {
        Self { timeout, cookies }
    }

    /// Run one yt-dlp invocation with the shared flags applied.
    pub(crate) async fn run(&self, args: &[&str]) -> MediaResult<std::process::Output> {
        which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)?;

        let mut cmd = Command::new("yt-dlp");
        cmd.args(["--user-agent", USER_AGENT]);
        if let Some(cookies) = &self.cookies {
            cmd.arg("--cookies").arg(cookies);
        }
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(MediaError::Timeout(self.timeout.as_secs())),
        }
    }
}

#[async_trait]
impl MetadataProvider for YtDlpProvider {
    async fn fetch_metadata(&self, video: &VideoReference) -> MediaResult<VideoMetadata> {
        let url = video.watch_url();
        info!("Fetching metadata for {}", url);

        let output = self.run(&["--dump-json", "--skip-download", &url]).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp stderr: {}", stderr);
            return Err(MediaError::provider(
                stderr.lines().last().unwrap_or("Unknown error"),
            ));
        }

        parse_metadata(&String::from_utf8_lossy(&output.stdout))
    }

    async fn fetch_subtitle(
        &self,
        video: &VideoReference,
        lang: &str,
        format: &str,
    ) -> MediaResult<String> {
        crate::download::fetch_subtitle(self, video, lang, format).await
    }
}

/// Parse the provider's stdout into a metadata document.
///
/// yt-dlp emits one JSON document per line for playlists; only the first
/// document is used.
pub(crate) fn parse_metadata(stdout: &str) -> MediaResult<VideoMetadata> {
    let first = stdout
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| MediaError::provider("no output"))?;

    serde_json::from_str(first).map_err(|e| MediaError::parse(e.to_string()))
}
