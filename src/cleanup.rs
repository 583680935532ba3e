//! Dedup pass over an already-written playlist, the second half of the
//! `raw` operating mode: the scraper writes everything it saw, this tool
//! collapses duplicate channel names afterwards.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

static TRAILING_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(.+)$").unwrap());

static TVG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"tvg-name="([^"]+)""#).unwrap());

/// One `#EXTINF` line paired with its media URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistPair {
    /// Dedup key extracted from the info line.
    pub name: String,
    pub extinf: String,
    pub url: String,
}

/// A playlist split into pass-through header lines and entry pairs.
#[derive(Debug, Default)]
pub struct ParsedPlaylist {
    pub header: Vec<String>,
    pub pairs: Vec<PlaylistPair>,
}

/// Channel name carried by an `#EXTINF` line: the trailing
/// comma-delimited label, falling back to the `tvg-name` attribute.
#[must_use]
pub fn channel_name(extinf: &str) -> Option<String> {
    TRAILING_LABEL_RE
        .captures(extinf)
        .or_else(|| TVG_NAME_RE.captures(extinf))
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Pairs each `#EXTINF` line with the next `http(s)`-prefixed line.
///
/// Lines starting with the format marker or an extension directive pass
/// through as header; blank lines and anything unpaired are dropped.
#[must_use]
pub fn parse(content: &str) -> ParsedPlaylist {
    let mut parsed = ParsedPlaylist::default();
    let mut pending_extinf: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("#EXTM3U") || line.starts_with("#EXT-X-") {
            parsed.header.push(line.to_string());
            continue;
        }

        if line.starts_with("#EXTINF") {
            pending_extinf = Some(line.to_string());
            continue;
        }

        if line.starts_with("http://") || line.starts_with("https://") {
            if let Some(extinf) = pending_extinf.take() {
                if let Some(name) = channel_name(&extinf) {
                    parsed.pairs.push(PlaylistPair {
                        name,
                        extinf,
                        url: line.to_string(),
                    });
                } else {
                    warn!("Could not extract a channel name from: {extinf}");
                }
            }
        }
    }

    parsed
}

/// Deduplicates pairs first-occurrence-wins by channel name and renders
/// the cleaned playlist. Returns `None` when no valid pair survives, in
/// which case no output file should be written.
#[must_use]
pub fn clean(content: &str) -> Option<(String, usize)> {
    let parsed = parse(content);

    let mut seen = std::collections::HashSet::new();
    let kept: Vec<&PlaylistPair> = parsed
        .pairs
        .iter()
        .filter(|pair| seen.insert(pair.name.clone()))
        .collect();
    if kept.is_empty() {
        return None;
    }

    let mut lines = parsed.header;
    for pair in &kept {
        lines.push(pair.extinf.clone());
        lines.push(pair.url.clone());
    }
    Some((lines.join("\n"), kept.len()))
}
