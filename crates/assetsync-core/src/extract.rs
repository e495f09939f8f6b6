//! Zip extraction into a version's output directory.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// What an extraction wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub dirs: usize,
    /// Entries skipped because their names would land outside the destination.
    pub skipped: usize,
}

/// Extracts every entry of the zip at `archive` under `dest`, creating `dest` if needed.
///
/// Existing files are overwritten; files not in the archive are left alone.
/// Stored unix modes are not applied, so a later run can always rewrite the tree.
/// A malformed archive is an error.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<ExtractSummary> {
    let file = File::open(archive).with_context(|| format!("open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("read zip {}", archive.display()))?;

    fs::create_dir_all(dest).with_context(|| format!("create {}", dest.display()))?;

    let mut summary = ExtractSummary::default();
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .with_context(|| format!("zip entry {} in {}", i, archive.display()))?;

        let outpath = match entry.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                tracing::warn!(entry = entry.name(), "skipping zip entry outside destination");
                summary.skipped += 1;
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&outpath)
                .with_context(|| format!("create {}", outpath.display()))?;
            summary.dirs += 1;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let mut outfile =
            File::create(&outpath).with_context(|| format!("create {}", outpath.display()))?;
        io::copy(&mut entry, &mut outfile)
            .with_context(|| format!("write {}", outpath.display()))?;
        summary.files += 1;
    }

    tracing::debug!(
        archive = %archive.display(),
        dest = %dest.display(),
        files = summary.files,
        dirs = summary.dirs,
        "extracted"
    );
    Ok(summary)
}
