//! Track selection policy configuration.
//!
//! Both knobs are explicit configuration rather than hard-coded behavior:
//! which format entry wins within a language group, and which auto-generated
//! captions are emitted alongside the manual tracks.

use std::str::FromStr;

use thiserror::Error;

/// Format preference order for track selection.
pub const FORMAT_PREFERENCE: [&str; 5] = ["srv3", "srv2", "srv1", "ttml", "vtt"];

/// Error for unrecognized policy names in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized policy name: {0}")]
pub struct PolicyParseError(String);

/// How a single format entry is chosen within a language group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Walk [`FORMAT_PREFERENCE`], falling back to the provider's first
    /// entry when none of the preferred formats exist.
    #[default]
    Preferred,

    /// Take the first entry whose extension is exactly `vtt`; skip the
    /// language entirely when it has none.
    VttOnly,
}

impl FromStr for FormatPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preferred" => Ok(FormatPolicy::Preferred),
            "vtt-only" | "vtt_only" => Ok(FormatPolicy::VttOnly),
            other => Err(PolicyParseError(other.to_string())),
        }
    }
}

/// Which auto-generated captions are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoScope {
    /// One track per auto language that has no manual counterpart.
    #[default]
    All,

    /// Only the primary language, regardless of manual overlap, with the
    /// display name suffixed `" (Auto)"`.
    PrimaryOnly,
}

impl FromStr for AutoScope {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(AutoScope::All),
            "primary-only" | "primary_only" => Ok(AutoScope::PrimaryOnly),
            other => Err(PolicyParseError(other.to_string())),
        }
    }
}

/// Combined selection policy for the track resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionPolicy {
    pub format: FormatPolicy,
    pub auto_scope: AutoScope,
}
