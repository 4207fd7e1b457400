//! Subtitle materialization via the metadata provider.
//!
//! Direct re-fetch mode: ask yt-dlp to write the requested subtitle into a
//! scoped temporary directory, then read back exactly one matching file.
//! The directory is removed on every exit path when the `TempDir` drops.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use subgate_models::VideoReference;

use crate::error::{MediaError, MediaResult};
use crate::provider::YtDlpProvider;

pub(crate) async fn fetch_subtitle(
    provider: &YtDlpProvider,
    video: &VideoReference,
    lang: &str,
    format: &str,
) -> MediaResult<String> {
    let url = video.watch_url();
    info!("Fetching {} subtitle for {} as {}", lang, url, format);

    let workdir = TempDir::new()?;
    let output_template = workdir.path().join("%(id)s");
    let output_template_str = output_template.to_string_lossy();

    let args = [
        "--skip-download",
        "--write-sub",
        "--write-auto-sub",
        "--sub-lang",
        lang,
        "--sub-format",
        format,
        "--output",
        &output_template_str,
        &url,
    ];

    let output = provider.run(&args).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp subtitle stderr: {}", stderr);
        return Err(MediaError::provider(
            stderr.lines().last().unwrap_or("Unknown error"),
        ));
    }

    let files = matching_subtitle_files(workdir.path(), format)?;
    if files.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::not_found(format!(
            "no {} subtitle produced for language {}: {}",
            format,
            lang,
            stderr.lines().last().unwrap_or("no diagnostic")
        )));
    }
    if files.len() > 1 {
        warn!(
            "{} subtitle files matched for language {}, using {}",
            files.len(),
            lang,
            files[0].display()
        );
    }

    let content = tokio::fs::read_to_string(&files[0]).await?;
    Ok(content)
}

/// Files in `dir` with the requested subtitle extension, sorted by name.
fn matching_subtitle_files(dir: &Path, ext: &str) -> MediaResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(ext))
        .collect();
    files.sort();
    Ok(files)
}
