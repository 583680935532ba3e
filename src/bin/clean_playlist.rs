//! Standalone dedup pass over a playlist written in `raw` mode.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tvjustin_m3u::cleanup;

/// Deduplicates channels in an existing M3U playlist by name
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Playlist to clean
    #[arg(default_value = "justintv_kanallar_raw.m3u8")]
    input: PathBuf,

    /// Cleaned playlist destination
    #[arg(default_value = "justintv_kanallar.m3u8")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let content = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Reading {}", args.input.display()))?;

    match cleanup::clean(&content) {
        Some((cleaned, kept)) => {
            tokio::fs::write(&args.output, cleaned)
                .await
                .with_context(|| format!("Writing {}", args.output.display()))?;
            info!(
                "{kept} uniquely named channels written to {}",
                args.output.display()
            );
        }
        None => info!("No valid channel pairs found, nothing written"),
    }

    Ok(())
}
