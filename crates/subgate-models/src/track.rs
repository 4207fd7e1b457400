//! Resolved subtitle track models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a caption track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrackOrigin {
    /// Authored or uploaded by the content creator
    Manual,
    /// Produced by automatic speech recognition
    Auto,
}

impl TrackOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackOrigin::Manual => "manual",
            TrackOrigin::Auto => "auto",
        }
    }
}

impl fmt::Display for TrackOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One subtitle track resolved for a video.
///
/// Serialized shape: `{"lang", "name", "url", "ext", "type"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubtitleTrack {
    /// Language code as reported by the provider
    pub lang: String,

    /// Human-readable display name (falls back to the language code)
    pub name: String,

    /// Source URL for the raw subtitle payload; never empty
    pub url: String,

    /// Format extension (vtt, srv3, ttml, ...)
    pub ext: String,

    /// Manual or auto-generated
    #[serde(rename = "type")]
    pub origin: TrackOrigin,
}

impl SubtitleTrack {
    /// Create a new resolved track.
    pub fn new(
        lang: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        ext: impl Into<String>,
        origin: TrackOrigin,
    ) -> Self {
        Self {
            lang: lang.into(),
            name: name.into(),
            url: url.into(),
            ext: ext.into(),
            origin,
        }
    }
}
