//! WebVTT to plain-text conversion.
//!
//! Two deliberately distinct strategies:
//! - [`vtt_to_transcript`]: cue-block aware. Deduplicates roll-up captions
//!   and prefixes each line with a `[MM:SS]` stamp.
//! - [`strip_cue_lines`]: crude line filter that keeps cue text verbatim.

use std::collections::HashSet;

use regex::Regex;

/// Convert a VTT payload into deduplicated, timestamp-prefixed plain text.
///
/// Blocks are separated by blank lines. Each block contributes at most one
/// output line: the last non-empty text line, stamped with the block's start
/// time. Roll-up captions repeat earlier lines across blocks, so text that
/// was already emitted in this call is dropped. Blocks without a timing line
/// or without any text are discarded.
pub fn vtt_to_transcript(payload: &str) -> String {
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();

    let normalized = payload.replace('\r', "");
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();

    for block in normalized.split("\n\n") {
        let mut start: Option<&str> = None;
        let mut texts: Vec<String> = Vec::new();

        for line in block.lines() {
            let line = line.trim();
            if let Some(idx) = line.find("-->") {
                start = Some(line[..idx].trim());
                continue;
            }
            if line.is_empty()
                || line == "WEBVTT"
                || line.starts_with("Kind:")
                || line.starts_with("Language:")
                || line.starts_with("NOTE")
                || line.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            let text = tag_pattern.replace_all(line, "").trim().to_string();
            if !text.is_empty() {
                texts.push(text);
            }
        }

        let Some(start) = start else { continue };
        let Some(text) = texts.last() else { continue };
        if !seen.insert(text.clone()) {
            continue;
        }
        out.push(format!("{} {}", stamp_prefix(start), text));
    }

    out.join("\n")
}

/// Strip cue structure from a VTT payload, keeping text lines verbatim.
///
/// Drops the `WEBVTT` header line and everything before it, then every
/// timing line, blank line, `NOTE` line, and purely numeric cue index.
/// No deduplication and no timestamps; already-converted plain text passes
/// through unchanged.
pub fn strip_cue_lines(payload: &str) -> String {
    let normalized = payload.replace('\r', "");
    let lines: Vec<&str> = normalized.lines().collect();

    let body_start = lines
        .iter()
        .position(|line| line.trim().starts_with("WEBVTT"))
        .map(|i| i + 1)
        .unwrap_or(0);

    lines[body_start..]
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !(trimmed.is_empty()
                || trimmed.contains("-->")
                || trimmed.starts_with("NOTE")
                || trimmed.chars().all(|c| c.is_ascii_digit()))
        })
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reformat a raw cue start token into a `[MM:SS]` prefix.
///
/// Minutes are totalized and may exceed 59. Tokens that do not parse keep
/// their raw form in brackets.
fn stamp_prefix(raw: &str) -> String {
    match parse_start(raw) {
        Some((minutes, seconds)) => format!("[{:02}:{:02}]", minutes, seconds),
        None => format!("[{}]", raw),
    }
}

/// Parse `H:MM:SS(.f)` or `MM:SS(.f)` into (total minutes, seconds).
///
/// The fraction is truncated. Two-segment stamps are common in auto-caption
/// output and are treated as hours = 0.
fn parse_start(raw: &str) -> Option<(u64, u64)> {
    let base = raw.trim().split('.').next()?;
    let parts: Vec<&str> = base.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (h.parse::<u64>().ok()?, m.parse::<u64>().ok()?, s.parse::<u64>().ok()?),
        [m, s] => (0, m.parse::<u64>().ok()?, s.parse::<u64>().ok()?),
        _ => return None,
    };

    Some((hours * 60 + minutes, seconds))
}
