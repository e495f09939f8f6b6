//! The sync procedure: list versions, then download and extract each one in turn.
//!
//! Only per-version download failures (HTTP status, URL/connection) are
//! reported and skipped. Everything else aborts the run.

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

use crate::artifact::{artifact_url, version_dir};
use crate::config::AssetsConfig;
use crate::extract::{extract_zip, ExtractSummary};
use crate::fetch::{download_to_dir, FetchError, HttpOptions};
use crate::listing::{fetch_listing, Version};

/// Why a version's archive was not downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadFailure {
    /// Non-2xx response status.
    Http(u32),
    /// Request never produced a response (DNS, connect, transport).
    Url(String),
}

/// Progress notifications, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Listed { count: usize },
    Downloading { version: Version, url: String },
    Downloaded { version: Version, path: PathBuf },
    DownloadFailed { version: Version, url: String, failure: DownloadFailure },
    /// Version name cannot be mapped to a directory under the output root.
    Rejected { version: Version },
    Extracting { artifact: String, version: Version },
    Extracted { version: Version, dir: PathBuf, summary: ExtractSummary },
    Completed { artifact: String, report: SyncReport },
}

impl SyncEvent {
    /// Line printed to stdout for this event, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            SyncEvent::Downloading { url, .. } => Some(format!("downloading: {url}")),
            SyncEvent::DownloadFailed { url, failure, .. } => Some(match failure {
                DownloadFailure::Http(code) => format!("HTTP Error: {code} {url}"),
                DownloadFailure::Url(reason) => format!("URL Error: {reason} {url}"),
            }),
            SyncEvent::Rejected { version } => {
                Some(format!("skipping version \"{version}\": not a usable directory name"))
            }
            SyncEvent::Extracting { artifact, version } => {
                Some(format!("unzipping {artifact}:{version}"))
            }
            SyncEvent::Completed { artifact, .. } => {
                Some(format!("Completed download of {artifact}."))
            }
            SyncEvent::Listed { .. } | SyncEvent::Downloaded { .. } | SyncEvent::Extracted { .. } => {
                None
            }
        }
    }
}

/// Tally of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub listed: usize,
    pub downloaded: usize,
    pub failed: usize,
    pub extracted: usize,
    pub rejected: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} listed, {} downloaded, {} failed, {} extracted, {} rejected",
            self.listed, self.downloaded, self.failed, self.extracted, self.rejected
        )
    }
}

/// Lists versions from `cfg.listing_url`, then downloads and extracts each.
pub fn run<F>(cfg: &AssetsConfig, on_event: F) -> Result<SyncReport>
where
    F: FnMut(&SyncEvent),
{
    let opts = cfg.http.to_options();
    let versions = fetch_listing(&cfg.listing_url, &opts)?;
    run_versions(cfg, &versions, on_event)
}

/// Downloads and extracts the given versions, in order, without consulting the listing.
pub fn run_versions<F>(cfg: &AssetsConfig, versions: &[Version], mut on_event: F) -> Result<SyncReport>
where
    F: FnMut(&SyncEvent),
{
    let opts = cfg.http.to_options();
    let mut report = SyncReport {
        listed: versions.len(),
        ..SyncReport::default()
    };
    on_event(&SyncEvent::Listed {
        count: versions.len(),
    });

    for version in versions {
        sync_version(cfg, &opts, version, &mut report, &mut on_event)
            .with_context(|| format!("version {version}"))?;
    }

    tracing::info!(artifact = %cfg.artifact, %report, "sync finished");
    on_event(&SyncEvent::Completed {
        artifact: cfg.artifact.clone(),
        report,
    });
    Ok(report)
}

fn sync_version<F>(
    cfg: &AssetsConfig,
    opts: &HttpOptions,
    version: &Version,
    report: &mut SyncReport,
    on_event: &mut F,
) -> Result<()>
where
    F: FnMut(&SyncEvent),
{
    let dest = match version_dir(&cfg.output_root, version.as_str()) {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("{}", e);
            report.rejected += 1;
            on_event(&SyncEvent::Rejected {
                version: version.clone(),
            });
            return Ok(());
        }
    };

    let url = artifact_url(&cfg.listing_url, &cfg.artifact, version.as_str());
    on_event(&SyncEvent::Downloading {
        version: version.clone(),
        url: url.clone(),
    });

    let archive = match download_to_dir(&url, &cfg.archive_dir, opts) {
        Ok(path) => path,
        Err(e) if e.is_recoverable() => {
            tracing::warn!(%version, "download failed: {}", e);
            report.failed += 1;
            on_event(&SyncEvent::DownloadFailed {
                version: version.clone(),
                url,
                failure: failure_of(&e),
            });
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    report.downloaded += 1;
    on_event(&SyncEvent::Downloaded {
        version: version.clone(),
        path: archive.clone(),
    });

    on_event(&SyncEvent::Extracting {
        artifact: cfg.artifact.clone(),
        version: version.clone(),
    });
    let summary = extract_zip(&archive, &dest)?;
    report.extracted += 1;
    on_event(&SyncEvent::Extracted {
        version: version.clone(),
        dir: dest,
        summary,
    });
    Ok(())
}

fn failure_of(e: &FetchError) -> DownloadFailure {
    match e {
        FetchError::Http { code, .. } => DownloadFailure::Http(*code),
        other => DownloadFailure::Url(other.reason()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::new(s)
    }

    #[test]
    fn messages_match_progress_output() {
        let url = "https://nexus/x/1.0.0/assets-frontend-1.0.0.zip".to_string();
        let downloading = SyncEvent::Downloading {
            version: v("1.0.0"),
            url: url.clone(),
        };
        assert_eq!(downloading.message().unwrap(), format!("downloading: {url}"));

        let http = SyncEvent::DownloadFailed {
            version: v("1.0.0"),
            url: url.clone(),
            failure: DownloadFailure::Http(404),
        };
        assert_eq!(http.message().unwrap(), format!("HTTP Error: 404 {url}"));

        let conn = SyncEvent::DownloadFailed {
            version: v("1.0.0"),
            url: url.clone(),
            failure: DownloadFailure::Url("Couldn't resolve host name".to_string()),
        };
        assert_eq!(
            conn.message().unwrap(),
            format!("URL Error: Couldn't resolve host name {url}")
        );

        let unzip = SyncEvent::Extracting {
            artifact: "assets-frontend".to_string(),
            version: v("1.0.0"),
        };
        assert_eq!(unzip.message().unwrap(), "unzipping assets-frontend:1.0.0");

        let done = SyncEvent::Completed {
            artifact: "assets-frontend".to_string(),
            report: SyncReport::default(),
        };
        assert_eq!(done.message().unwrap(), "Completed download of assets-frontend.");
    }

    #[test]
    fn quiet_events_have_no_message() {
        assert!(SyncEvent::Listed { count: 3 }.message().is_none());
        assert!(SyncEvent::Downloaded {
            version: v("1.0.0"),
            path: PathBuf::from("a.zip"),
        }
        .message()
        .is_none());
    }

    #[test]
    fn unsafe_version_is_rejected_without_network() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = AssetsConfig {
            listing_url: "http://127.0.0.1:9/repo/".to_string(),
            output_root: tmp.path().join("assets"),
            archive_dir: tmp.path().to_path_buf(),
            ..AssetsConfig::default()
        };
        let mut events = Vec::new();
        let report = run_versions(&cfg, &[v("../escape")], |e| events.push(e.clone())).unwrap();

        assert_eq!(report.rejected, 1);
        assert_eq!(report.downloaded, 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, SyncEvent::Rejected { version } if version.as_str() == "../escape")));
        assert!(!events.iter().any(|e| matches!(e, SyncEvent::Downloading { .. })));
    }

    #[test]
    fn report_display() {
        let r = SyncReport {
            listed: 3,
            downloaded: 2,
            failed: 1,
            extracted: 2,
            rejected: 0,
        };
        assert_eq!(
            r.to_string(),
            "3 listed, 2 downloaded, 1 failed, 2 extracted, 0 rejected"
        );
    }
}
