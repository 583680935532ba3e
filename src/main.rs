use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tvjustin_m3u::browser::BrowserSession;
use tvjustin_m3u::config::ScrapeConfig;
use tvjustin_m3u::error::ScrapeError;
use tvjustin_m3u::playlist::{self, PlaylistHeader};
use tvjustin_m3u::scrape;

/// Scrapes the tvjustin.com live channel directory into an M3U playlist
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Whether duplicate channel names are collapsed before writing
    #[arg(short, long, value_enum, default_value_t = Mode::Filtered)]
    mode: Mode,

    /// Output path [default: justintv_kanallar.m3u8, or the _raw variant in raw mode]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// First occurrence wins for every duplicate channel name
    Filtered,
    /// Keep every scraped record, duplicates included
    Raw,
}

impl Mode {
    const fn default_output(self) -> &'static str {
        match self {
            Self::Filtered => "justintv_kanallar.m3u8",
            Self::Raw => "justintv_kanallar_raw.m3u8",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = ScrapeConfig::default();
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(args.mode.default_output()));

    let ct = CancellationToken::new();
    spawn_ct_watcher(ct.clone());

    let session = BrowserSession::launch(&cfg).await?;
    let result = tokio::select! {
        () = ct.cancelled() => Err(anyhow::anyhow!("Interrupted, no playlist written")),
        r = run(&session, &cfg, args.mode, &output) => r,
    };

    // The browser session is released on every exit path before the
    // process returns, success or not.
    session.shutdown().await;

    if let Err(e) = &result {
        error!("Run failed: {e:#}");
    }
    result
}

async fn run(
    session: &BrowserSession,
    cfg: &ScrapeConfig,
    mode: Mode,
    output: &Path,
) -> Result<()> {
    let directory_page = session.new_page().await?;

    let source = scrape::resolve_default_source(&directory_page, cfg)
        .await
        .context("Resolving default channel info")?;

    // The event page gets its own tab: the lister must run against a
    // page still displaying the full directory.
    let event_page = session.new_page().await?;
    let base_path = scrape::extract_base_path(&event_page, cfg, &source.event_url)
        .await
        .context("Extracting the base media path")?;
    info!("Base media path: {base_path}");

    let channels = scrape::list_channels(&directory_page, cfg)
        .await
        .context("Listing channels")?;
    if channels.is_empty() {
        bail!(ScrapeError::EmptyListing);
    }

    let channels = match mode {
        Mode::Filtered => {
            let total = channels.len();
            let deduped = playlist::dedup_channels(channels);
            info!(
                "{} channels left after dedup (of {} raw)",
                deduped.len(),
                total
            );
            deduped
        }
        Mode::Raw => channels,
    };

    let entries = playlist::build_entries(&base_path, &channels);
    let header = PlaylistHeader::from_config(cfg);
    let written = playlist::write_playlist(output, &header, &entries).await?;
    if written > 0 {
        info!("{written} channels saved to {}", output.display());
    }

    Ok(())
}

/// Spawn a task that cancels the run when CTRL+C is caught.
fn spawn_ct_watcher(ct: CancellationToken) {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Caught CTRL+C signal!");
        ct.cancel();
    });
}
