use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ScrapeConfig;
use crate::groups;
use crate::scrape::ChannelRecord;

/// Fixed directive block emitted before any entry.
#[derive(Debug, Clone)]
pub struct PlaylistHeader {
    pub user_agent: String,
    /// Domain root with trailing slash.
    pub referer: String,
    /// Domain root without trailing slash.
    pub origin: String,
}

impl PlaylistHeader {
    #[must_use]
    pub fn from_config(cfg: &ScrapeConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            referer: cfg.domain.clone(),
            origin: cfg.origin().to_string(),
        }
    }
}

/// One info/URL pair of the output playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub name: String,
    pub group: String,
    pub media_url: String,
}

/// Final media URL for one channel: base path + id + fixed suffix.
#[must_use]
pub fn media_url(base_path: &str, stream_id: &str) -> String {
    format!("{base_path}{stream_id}.m3u8")
}

/// Collapses the raw scrape to first-occurrence-wins by exact name,
/// preserving input order. Exact string equality on purpose: names
/// differing only in a schedule suffix are distinct channels.
#[must_use]
pub fn dedup_channels(channels: Vec<ChannelRecord>) -> Vec<ChannelRecord> {
    let mut seen = HashSet::new();
    channels
        .into_iter()
        .filter(|channel| seen.insert(channel.name.clone()))
        .collect()
}

/// Classifies each channel and derives its media URL, in input order.
#[must_use]
pub fn build_entries(base_path: &str, channels: &[ChannelRecord]) -> Vec<PlaylistEntry> {
    channels
        .iter()
        .map(|channel| PlaylistEntry {
            name: channel.name.clone(),
            group: groups::channel_group(&channel.name).to_string(),
            media_url: media_url(base_path, &channel.stream_id),
        })
        .collect()
}

/// Renders the playlist text: header directives, then one `#EXTINF` /
/// URL line pair per entry. Newline-joined, no trailing blank line.
#[must_use]
pub fn render(header: &PlaylistHeader, entries: &[PlaylistEntry]) -> String {
    let mut lines = vec![
        "#EXTM3U".to_string(),
        format!("#EXT-X-USER-AGENT:{}", header.user_agent),
        format!("#EXT-X-REFERER:{}", header.referer),
        format!("#EXT-X-ORIGIN:{}", header.origin),
    ];
    for entry in entries {
        lines.push(format!(
            "#EXTINF:-1 tvg-name=\"{name}\" group-title=\"{group}\",{name}",
            name = entry.name,
            group = entry.group,
        ));
        lines.push(entry.media_url.clone());
    }
    lines.join("\n")
}

/// Writes the playlist to `path` and returns the number of entries
/// written. With zero entries no artifact is produced at all, reported
/// as `Ok(0)` rather than as an error.
///
/// # Errors
/// Errors when the file cannot be written.
pub async fn write_playlist(
    path: &Path,
    header: &PlaylistHeader,
    entries: &[PlaylistEntry],
) -> Result<usize> {
    if entries.is_empty() {
        info!("No valid entries, not writing a playlist file");
        return Ok(0);
    }

    tokio::fs::write(path, render(header, entries))
        .await
        .with_context(|| format!("Writing playlist to {}", path.display()))?;
    Ok(entries.len())
}
