//! Subtitle proxy handler.
//!
//! Fetches a previously resolved track URL directly and optionally strips
//! the cue structure.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use subgate_media::convert;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for the subtitle proxy.
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    /// Subtitle source URL, as resolved by the track listing
    #[serde(default)]
    pub url: Option<String>,

    /// Optional output format: `txt` strips cue structure
    #[serde(default)]
    pub format: Option<String>,
}

/// Proxy a subtitle payload from its source URL.
pub async fn proxy_subtitles(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> ApiResult<Response> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing url parameter"))?;

    info!("Proxying subtitle fetch for {}", url);

    let payload = state.fetcher.fetch(&url).await?;
    let body = match query.format.as_deref() {
        Some("txt") => convert::strip_cue_lines(&payload),
        _ => payload,
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    Ok((headers, body).into_response())
}
