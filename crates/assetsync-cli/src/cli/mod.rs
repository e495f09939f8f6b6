//! CLI for assetsync.

mod commands;

use anyhow::Result;
use assetsync_core::config::{self, AssetsConfig, ConfigOverrides};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_fetch, run_list, run_sync};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "assetsync")]
#[command(
    about = "Mirror published assets-frontend builds from Nexus into an nginx asset root",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options accepted by every subcommand; they override config.toml.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Read this config file instead of ~/.config/assetsync/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository listing URL (also the base for archive URLs).
    #[arg(long, global = true, value_name = "URL")]
    pub listing_url: Option<String>,

    /// Artifact name used in archive file names.
    #[arg(long, global = true, value_name = "NAME")]
    pub artifact: Option<String>,

    /// Directory receiving one extracted tree per version.
    #[arg(long, global = true, value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Directory where downloaded archives are written.
    #[arg(long, global = true, value_name = "DIR")]
    pub archive_dir: Option<PathBuf>,
}

impl GlobalArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listing_url: self.listing_url.clone(),
            artifact: self.artifact.clone(),
            output_root: self.output_root.clone(),
            archive_dir: self.archive_dir.clone(),
        }
    }

    /// Loads the config file (explicit or XDG default) and applies overrides.
    pub fn load_config(&self) -> Result<AssetsConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        cfg.apply(self.overrides());
        Ok(cfg)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List versions, then download and extract every one of them.
    Sync,

    /// Print the versions published in the repository listing.
    List,

    /// Download and extract the given versions without reading the listing.
    Fetch {
        /// Version identifiers, e.g. 2.141.0.
        #[arg(required = true)]
        versions: Vec<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.global.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Sync => run_sync(cfg).await?,
            CliCommand::List => run_list(cfg).await?,
            CliCommand::Fetch { versions } => run_fetch(cfg, versions).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
