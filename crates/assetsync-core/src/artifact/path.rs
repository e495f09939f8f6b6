//! URL path segments and version output directories.

use std::path::{Component, Path, PathBuf};

/// A listed version that cannot be used as a directory name under the output root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("version {version:?} is not a single path component")]
pub struct UnsafeVersion {
    pub version: String,
}

/// Extracts the last non-empty path segment of a URL.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Output directory for a version: `<output_root>/<version>`.
///
/// The version must be exactly one normal path component (no separators,
/// no `.`/`..`, not empty, no NUL), otherwise extraction could land outside
/// `output_root`.
pub fn version_dir(output_root: &Path, version: &str) -> Result<PathBuf, UnsafeVersion> {
    let unsafe_version = || UnsafeVersion {
        version: version.to_string(),
    };
    if version.contains('\0') {
        return Err(unsafe_version());
    }
    let mut components = Path::new(version).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) if c == version => Ok(output_root.join(version)),
        _ => Err(unsafe_version()),
    }
}
