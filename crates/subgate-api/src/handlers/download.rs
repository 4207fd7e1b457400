//! Subtitle download handler.
//!
//! Re-fetches the subtitle through the metadata provider (direct re-fetch
//! mode) and optionally converts it to timestamped plain text.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use subgate_media::convert;
use subgate_models::VideoReference;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for subtitle download.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Video URL or bare video ID
    #[serde(default)]
    pub url: Option<String>,

    /// Subtitle language
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Output format: `vtt` (raw) or `txt` (converted transcript)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_format() -> String {
    "vtt".to_string()
}

/// Download one subtitle track as an attachment.
pub async fn download_subtitles(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing url parameter"))?;
    if query.format != "vtt" && query.format != "txt" {
        return Err(ApiError::bad_request("format must be vtt or txt"));
    }
    if query.lang.trim().is_empty() {
        return Err(ApiError::bad_request("lang must not be empty"));
    }

    let video = VideoReference::new(url);
    info!(
        "Downloading {} subtitle for {} as {}",
        query.lang, video, query.format
    );

    // The provider always materializes VTT; txt is a conversion of it
    let payload = state
        .provider
        .fetch_subtitle(&video, &query.lang, "vtt")
        .await?;
    let body = if query.format == "txt" {
        convert::vtt_to_transcript(&payload)
    } else {
        payload
    };

    let filename = format!("subtitles.{}.{}", query.lang, query.format);
    let disposition = format!("attachment; filename=\"{}\"", filename);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|e| ApiError::internal(e.to_string()))?,
    );

    Ok((headers, body).into_response())
}
