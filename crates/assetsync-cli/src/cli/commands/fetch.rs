//! `assetsync fetch <version>...` – download and extract specific versions.

use anyhow::Result;
use assetsync_core::config::AssetsConfig;
use assetsync_core::listing::Version;
use assetsync_core::sync;

use super::print_event;

pub async fn run_fetch(cfg: AssetsConfig, versions: Vec<String>) -> Result<()> {
    let versions: Vec<Version> = versions.into_iter().map(Version::new).collect();
    let report =
        tokio::task::spawn_blocking(move || sync::run_versions(&cfg, &versions, print_event))
            .await??;
    tracing::info!("fetch completed: {}", report);
    Ok(())
}
