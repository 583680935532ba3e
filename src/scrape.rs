use std::sync::LazyLock;

use regex::Regex;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::page::Page;

/// Fixed path segment terminating the base media path.
pub const BASE_PATH_SEGMENT: &str = "/checklist/";

static BASE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'](https?://[^"']+/checklist/)["']"#).unwrap());

// Some event page revisions only carry the base path as a variable
// assignment, so this is tried second.
static BASE_PATH_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"streamUrl\s*=\s*["'](https?://[^"']+/checklist/)["']"#).unwrap()
});

/// One channel as scraped from the directory, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    /// Display name, possibly carrying a parenthesized schedule time.
    pub name: String,
    /// Token from the item link's query string, appended to the base
    /// media path to form the final media URL.
    pub stream_id: String,
}

/// Default channel info resolved from the home page frame. Only used to
/// reach the event page that embeds the base media path.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub event_url: Url,
    pub stream_id: String,
}

/// Resolves the default channel's event URL and stream id from the frame
/// embedded on the home page.
///
/// Fatal on any failure: without the frame there is no way to locate the
/// base media path, so there is no retry at this layer.
///
/// # Errors
/// [`ScrapeError::ElementNotFound`] when the frame never appears,
/// [`ScrapeError::MissingAttribute`] when its `src` is empty and
/// [`ScrapeError::MissingIdentifier`] when the joined URL carries no id.
#[instrument(skip(page, cfg))]
pub async fn resolve_default_source(
    page: &dyn Page,
    cfg: &ScrapeConfig,
) -> Result<ResolvedSource, ScrapeError> {
    info!("Resolving default channel info from {}", cfg.domain);
    page.navigate(&cfg.domain, cfg.home_timeout).await?;
    page.wait_for_selector(&cfg.frame_selector, cfg.selector_timeout)
        .await?;

    let frames = page.query_all(&cfg.frame_selector).await?;
    let frame = frames
        .first()
        .ok_or_else(|| ScrapeError::ElementNotFound {
            selector: cfg.frame_selector.clone(),
        })?;

    let src = frame
        .attribute("src")
        .await?
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ScrapeError::MissingAttribute {
            selector: cfg.frame_selector.clone(),
            attribute: "src".to_string(),
        })?;

    let event_url = Url::parse(&cfg.domain)?.join(&src)?;
    let stream_id = stream_id_from_url(&event_url, &cfg.id_param).ok_or_else(|| {
        ScrapeError::MissingIdentifier {
            url: event_url.to_string(),
            param: cfg.id_param.clone(),
        }
    })?;

    info!("Default channel resolved: id={stream_id}, event url={event_url}");
    Ok(ResolvedSource {
        event_url,
        stream_id,
    })
}

/// Extracts the base media path from the event page source.
///
/// The result is the URL prefix every channel's stream id is appended to.
///
/// # Errors
/// [`ScrapeError::PatternNotFound`] when neither the quoted-URL pattern
/// nor the assignment fallback matches; fatal to the run.
#[instrument(skip(page, cfg, event_url))]
pub async fn extract_base_path(
    page: &dyn Page,
    cfg: &ScrapeConfig,
    event_url: &Url,
) -> Result<String, ScrapeError> {
    info!("Loading event page for the base media path: {event_url}");
    page.navigate(event_url.as_str(), cfg.event_timeout).await?;
    let source = page.content().await?;

    BASE_PATH_RE
        .captures(&source)
        .or_else(|| BASE_PATH_ASSIGN_RE.captures(&source))
        .map(|caps| caps[1].to_string())
        .ok_or(ScrapeError::PatternNotFound {
            pattern: BASE_PATH_SEGMENT,
        })
}

/// Scrapes every channel from the directory page, duplicates included.
///
/// Assumes the directory is already open in `page`; no navigation happens
/// here, only a settle delay for the client-side script that populates
/// the list. Items whose link yields no stream id are skipped silently,
/// the directory commonly contains placeholder entries. An empty result
/// is a valid value; the caller decides whether it is fatal.
///
/// # Errors
/// Only driver failures; an unpopulated listing is reported as `Ok(vec![])`.
#[instrument(skip(page, cfg))]
pub async fn list_channels(
    page: &dyn Page,
    cfg: &ScrapeConfig,
) -> Result<Vec<ChannelRecord>, ScrapeError> {
    info!("Collecting all channels from {}", cfg.domain);
    debug!("Waiting {:?} for the listing to settle", cfg.settle_delay);
    sleep(cfg.settle_delay).await;

    if !page.eval_bool(&population_predicate(cfg)).await? {
        warn!(
            "No `{}` items found inside `{}`",
            cfg.item_selector, cfg.list_container_selector
        );
        return Ok(Vec::new());
    }

    let items = page.query_all(&cfg.scoped_item_selector()).await?;
    debug!("Found {} candidate channel elements", items.len());

    let root = Url::parse(&cfg.domain)?;
    let mut channels = Vec::new();

    for item in items {
        let raw_name = item
            .text(&cfg.name_selector)
            .await?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| cfg.nameless_label.clone());
        let mut name = raw_name.replace(&cfg.live_marker, "").trim().to_string();
        if name.is_empty() {
            name = cfg.nameless_label.clone();
        }

        let Some(link) = item.attribute(&cfg.link_attribute).await? else {
            continue;
        };
        let Some(stream_id) = root
            .join(&link)
            .ok()
            .and_then(|u| stream_id_from_url(&u, &cfg.id_param))
        else {
            continue;
        };

        let schedule = item
            .text(&cfg.time_selector)
            .await?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && *t != cfg.live_marker);
        if let Some(time) = schedule {
            name = format!("{name} ({time})");
        }

        channels.push(ChannelRecord { name, stream_id });
    }

    info!("Extracted {} raw channel records", channels.len());
    Ok(channels)
}

/// Page-side predicate confirming the listing has been populated.
fn population_predicate(cfg: &ScrapeConfig) -> String {
    format!(
        "(() => {{ const container = document.querySelector('{}'); \
         if (!container) return false; \
         return container.querySelector('{}') !== null; }})()",
        cfg.list_container_selector, cfg.item_selector
    )
}

fn stream_id_from_url(url: &Url, param: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key.as_ref() == param)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
