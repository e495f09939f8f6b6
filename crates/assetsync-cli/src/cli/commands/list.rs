//! `assetsync list` – print the versions in the repository listing.

use anyhow::Result;
use assetsync_core::config::AssetsConfig;
use assetsync_core::listing;

pub async fn run_list(cfg: AssetsConfig) -> Result<()> {
    let versions = tokio::task::spawn_blocking(move || {
        listing::fetch_listing(&cfg.listing_url, &cfg.http.to_options())
    })
    .await??;

    if versions.is_empty() {
        println!("No versions listed.");
    }
    for v in versions {
        println!("{v}");
    }
    Ok(())
}
