//! Track selection and resolution.

use subgate_models::{
    AutoScope, CaptionFormatEntry, FormatPolicy, SelectionPolicy, SubtitleTrack, TrackOrigin,
    VideoMetadata, VideoReference, FORMAT_PREFERENCE,
};

use crate::error::MediaResult;
use crate::provider::MetadataProvider;

/// Resolve a video reference into metadata and candidate subtitle tracks.
pub async fn resolve<P: MetadataProvider + ?Sized>(
    provider: &P,
    video: &VideoReference,
    policy: &SelectionPolicy,
) -> MediaResult<(VideoMetadata, Vec<SubtitleTrack>)> {
    let metadata = provider.fetch_metadata(video).await?;
    let tracks = select_tracks(&metadata, policy);
    Ok((metadata, tracks))
}

/// Apply the selection policy to a metadata document.
///
/// Manual tracks come first, then auto tracks. Iteration order within each
/// group follows the provider map and is not stable across runs.
pub fn select_tracks(meta: &VideoMetadata, policy: &SelectionPolicy) -> Vec<SubtitleTrack> {
    let mut tracks = Vec::new();

    for (lang, entries) in &meta.subtitles {
        if let Some(entry) = pick_entry(entries, policy.format) {
            tracks.push(SubtitleTrack::new(
                lang,
                display_name(lang, entries),
                &entry.url,
                &entry.ext,
                TrackOrigin::Manual,
            ));
        }
    }

    match policy.auto_scope {
        AutoScope::All => {
            for (lang, entries) in &meta.automatic_captions {
                if meta.subtitles.contains_key(lang) {
                    continue;
                }
                if let Some(entry) = pick_entry(entries, policy.format) {
                    tracks.push(SubtitleTrack::new(
                        lang,
                        display_name(lang, entries),
                        &entry.url,
                        &entry.ext,
                        TrackOrigin::Auto,
                    ));
                }
            }
        }
        AutoScope::PrimaryOnly => {
            let lang = meta.primary_language();
            if let Some(entries) = meta.automatic_captions.get(lang) {
                if let Some(entry) = pick_entry(entries, policy.format) {
                    tracks.push(SubtitleTrack::new(
                        lang,
                        format!("{} (Auto)", display_name(lang, entries)),
                        &entry.url,
                        &entry.ext,
                        TrackOrigin::Auto,
                    ));
                }
            }
        }
    }

    tracks
}

/// Pick one format entry within a language group, or none.
///
/// Entries without a URL are never candidates.
fn pick_entry(entries: &[CaptionFormatEntry], policy: FormatPolicy) -> Option<&CaptionFormatEntry> {
    match policy {
        FormatPolicy::Preferred => FORMAT_PREFERENCE
            .iter()
            .find_map(|ext| entries.iter().find(|e| e.ext == *ext && !e.url.is_empty()))
            .or_else(|| entries.iter().find(|e| !e.url.is_empty())),
        FormatPolicy::VttOnly => entries.iter().find(|e| e.ext == "vtt" && !e.url.is_empty()),
    }
}

/// First provider-supplied display name, else the language code.
fn display_name(lang: &str, entries: &[CaptionFormatEntry]) -> String {
    entries
        .iter()
        .find_map(|e| e.name.clone())
        .unwrap_or_else(|| lang.to_string())
}
