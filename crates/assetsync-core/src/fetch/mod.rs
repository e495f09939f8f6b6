//! HTTP GET for the listing page and version archives.
//!
//! Uses the curl crate (libcurl). Runs in the current thread; call from
//! `spawn_blocking` if used from async code.

mod error;
mod transfer;

pub use error::FetchError;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::artifact::archive_file_name;

/// Temporary file suffix used before the atomic rename onto the archive name.
pub const PART_SUFFIX: &str = ".part";

/// Per-request curl settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Overall transfer timeout; `None` lets a transfer run indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: None,
            user_agent: None,
        }
    }
}

/// Path for the in-progress file: appends `.part` to the final path.
pub fn part_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(PART_SUFFIX);
    PathBuf::from(o)
}

/// GETs `url` into memory. Non-2xx responses are `FetchError::Http`.
pub fn get_bytes(url: &str, opts: &HttpOptions) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    let code = transfer::get_streaming(url, opts, |data| {
        body.extend_from_slice(data);
        true
    })
    .map_err(|e| FetchError::url(e, url))?;

    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            code,
            url: url.to_string(),
        });
    }
    tracing::debug!(url, bytes = body.len(), "GET complete");
    Ok(body)
}

/// Downloads `url` into `dir`, naming the file after the URL's final path segment.
///
/// The body is written to `<name>.part` and renamed over `<name>` only after a
/// 2xx response, so a failed request leaves any archive from an earlier run
/// untouched. Returns the archive path.
pub fn download_to_dir(url: &str, dir: &Path, opts: &HttpOptions) -> Result<PathBuf, FetchError> {
    let final_path = dir.join(archive_file_name(url));
    let part = part_path(&final_path);

    let mut file = File::create(&part).map_err(|e| FetchError::storage(e, &part))?;
    let mut write_error: Option<std::io::Error> = None;
    let mut written = 0u64;

    let performed = transfer::get_streaming(url, opts, |data| match file.write_all(data) {
        Ok(()) => {
            written += data.len() as u64;
            true
        }
        Err(e) => {
            write_error = Some(e);
            false
        }
    });

    let outcome = match (performed, write_error) {
        (_, Some(e)) => Err(FetchError::storage(e, &part)),
        (Err(e), None) => Err(FetchError::url(e, url)),
        (Ok(code), None) if !(200..300).contains(&code) => Err(FetchError::Http {
            code,
            url: url.to_string(),
        }),
        (Ok(_), None) => file.flush().map_err(|e| FetchError::storage(e, &part)),
    };
    drop(file);

    if let Err(e) = outcome {
        let _ = fs::remove_file(&part);
        return Err(e);
    }

    fs::rename(&part, &final_path).map_err(|e| FetchError::storage(e, &final_path))?;
    tracing::debug!(url, bytes = written, path = %final_path.display(), "archive saved");
    Ok(final_path)
}
