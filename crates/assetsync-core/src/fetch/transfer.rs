//! Single-stream curl GET shared by the listing fetch and archive downloads.

use super::HttpOptions;

/// Performs a GET on `url`, passing each body chunk to `sink`.
///
/// `sink` returns `false` to abort the transfer (curl then reports a write error).
/// Follows redirects. Returns the final HTTP response code; a non-2xx status is
/// not an error at this level.
pub(crate) fn get_streaming<F>(url: &str, opts: &HttpOptions, mut sink: F) -> Result<u32, curl::Error>
where
    F: FnMut(&[u8]) -> bool,
{
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout)?;
    }
    if let Some(agent) = &opts.user_agent {
        easy.useragent(agent)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if sink(data) {
                Ok(data.len())
            } else {
                Ok(0)
            }
        })?;
        transfer.perform()?;
    }

    easy.response_code()
}
