//! Track listing handler.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use subgate_media::resolver;
use subgate_models::{SubtitleTrack, VideoReference};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for track listing.
#[derive(Debug, Deserialize)]
pub struct SubtitlesQuery {
    /// Video URL or bare video ID
    #[serde(default)]
    pub url: Option<String>,
}

/// Track listing response.
#[derive(Debug, Serialize)]
pub struct SubtitlesResponse {
    pub title: String,
    pub tracks: Vec<SubtitleTrack>,
}

/// List available subtitle tracks for a video.
pub async fn list_subtitles(
    State(state): State<AppState>,
    Query(query): Query<SubtitlesQuery>,
) -> ApiResult<Json<SubtitlesResponse>> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing url parameter"))?;
    let video = VideoReference::new(url);

    info!("Listing subtitle tracks for {}", video);

    let (metadata, tracks) =
        resolver::resolve(state.provider.as_ref(), &video, &state.config.policy).await?;

    Ok(Json(SubtitlesResponse {
        title: metadata.title,
        tracks,
    }))
}
