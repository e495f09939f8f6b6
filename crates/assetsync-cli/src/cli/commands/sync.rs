//! `assetsync sync` – list, download and extract every published version.

use anyhow::Result;
use assetsync_core::config::AssetsConfig;
use assetsync_core::sync;

use super::print_event;

pub async fn run_sync(cfg: AssetsConfig) -> Result<()> {
    let report = tokio::task::spawn_blocking(move || sync::run(&cfg, print_event)).await??;
    tracing::info!("sync completed: {}", report);
    Ok(())
}
