use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::HttpOptions;

/// Nexus content listing for the assets-frontend releases; also the base for archive URLs.
pub const DEFAULT_LISTING_URL: &str = "https://nexus-dev.tax.service.gov.uk/service/local/repositories/hmrc-releases/content/uk/gov/hmrc/assets-frontend/";
pub const DEFAULT_ARTIFACT: &str = "assets-frontend";
pub const DEFAULT_OUTPUT_ROOT: &str = "/var/lib/nginx/assets";

/// HTTP client settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall per-request timeout in seconds. Unset means a transfer may run indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Optional User-Agent header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn to_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Global configuration loaded from `~/.config/assetsync/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Repository listing page; archive URLs are built relative to it.
    pub listing_url: String,
    /// Artifact name used in archive file names (`<artifact>-<version>.zip`).
    pub artifact: String,
    /// Directory that receives one extracted tree per version.
    pub output_root: PathBuf,
    /// Directory where downloaded archives are written.
    pub archive_dir: PathBuf,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            artifact: DEFAULT_ARTIFACT.to_string(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            archive_dir: PathBuf::from("."),
            http: HttpConfig::default(),
        }
    }
}

/// Command-line overrides applied on top of the loaded file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listing_url: Option<String>,
    pub artifact: Option<String>,
    pub output_root: Option<PathBuf>,
    pub archive_dir: Option<PathBuf>,
}

impl AssetsConfig {
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.listing_url {
            self.listing_url = url;
        }
        if let Some(artifact) = overrides.artifact {
            self.artifact = artifact;
        }
        if let Some(root) = overrides.output_root {
            self.output_root = root;
        }
        if let Some(dir) = overrides.archive_dir {
            self.archive_dir = dir;
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<AssetsConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: AssetsConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AssetsConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AssetsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
