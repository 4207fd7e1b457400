//! Video metadata as reported by the external metadata provider.
//!
//! Field names mirror the provider's JSON dump so the document deserializes
//! directly; unknown fields are ignored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One representation of a caption track offered by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaptionFormatEntry {
    /// Format tag (vtt, srt, srv1, srv2, srv3, ttml, json3)
    #[serde(default)]
    pub ext: String,

    /// Download URL for this representation
    #[serde(default)]
    pub url: String,

    /// Provider display name, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CaptionFormatEntry {
    pub fn new(ext: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            url: url.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Map from language code to the provider's ordered format entries.
///
/// Iteration order across languages carries no meaning; the entry order
/// within a language is the provider's.
pub type LanguageTrackGroup = HashMap<String, Vec<CaptionFormatEntry>>;

/// Metadata document for one video.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    /// Video title, possibly empty
    #[serde(default)]
    pub title: String,

    /// Manual subtitle tracks keyed by language
    #[serde(default)]
    pub subtitles: LanguageTrackGroup,

    /// Auto-generated caption tracks keyed by language
    #[serde(default)]
    pub automatic_captions: LanguageTrackGroup,

    /// Primary language, when the provider reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl VideoMetadata {
    /// Primary language with the provider default applied.
    pub fn primary_language(&self) -> &str {
        match self.language.as_deref() {
            Some(lang) if !lang.is_empty() => lang,
            _ => "en",
        }
    }
}
