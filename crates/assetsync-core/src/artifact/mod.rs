//! Artifact naming: download URLs, archive file names and per-version output paths.
//!
//! Versions come verbatim from the repository listing. They are concatenated
//! into URLs unchanged; only the output path mapping checks that a version is
//! a single plain path component.

mod path;
mod sanitize;

pub use path::{last_path_segment, version_dir, UnsafeVersion};
pub use sanitize::sanitize_file_name;

/// File name used when a URL path yields nothing usable.
const DEFAULT_ARCHIVE_NAME: &str = "download.zip";

/// Builds the archive URL for one version:
/// `<base>/<version>/<artifact>-<version>.zip`.
///
/// `base` gets exactly one trailing slash; `version` is inserted verbatim.
pub fn artifact_url(base: &str, artifact: &str, version: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{version}/{artifact}-{version}.zip")
}

/// Local archive file name for a download URL: its final path segment, sanitized.
///
/// - `archive_file_name("https://repo/x/1.0.0/assets-frontend-1.0.0.zip")` → `"assets-frontend-1.0.0.zip"`
pub fn archive_file_name(url: &str) -> String {
    let raw = match last_path_segment(url) {
        Some(s) => s,
        None => return DEFAULT_ARCHIVE_NAME.to_string(),
    };
    let sanitized = sanitize_file_name(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_ARCHIVE_NAME.to_string()
    } else {
        sanitized
    }
}
