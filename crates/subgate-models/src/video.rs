//! Video reference normalization.

use std::fmt;

/// Video IDs are exactly 11 characters from this alphabet.
const VIDEO_ID_LEN: usize = 11;

/// Opaque reference to a video: a full URL or a bare video ID.
///
/// The gateway performs no validation beyond trimming; URLs are handed to
/// the metadata provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoReference(String);

impl VideoReference {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL handed to the metadata provider.
    ///
    /// Full URLs pass through verbatim; a bare video ID becomes a watch URL.
    pub fn watch_url(&self) -> String {
        if looks_like_video_id(&self.0) {
            format!("https://www.youtube.com/watch?v={}", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoReference {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for VideoReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Check whether a reference is a bare video ID rather than a URL.
fn looks_like_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
