//! Repository listing: fetch the Nexus content page and pull out version identifiers.
//!
//! The listing is XML of the form
//! `<content><data><content-item>...<text>1.2.3</text>...</content-item>...</data></content>`.
//! It is read with an HTML parser, which lowercases tag names and tolerates
//! whatever prolog or stray markup the repository manager adds.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::fmt;

use crate::fetch::{self, HttpOptions};

/// One published build, as labelled in the listing. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(s: impl Into<String>) -> Self {
        Version(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// A `content-item` carried no `text` element to read the version from.
    #[error("content-item #{index} has no <text> element")]
    MissingText { index: usize },
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: &'static str, message: String },
}

const ITEM_SELECTOR: &str = "content-item";
const TEXT_SELECTOR: &str = "text";

fn selector(s: &'static str) -> Result<Selector, ListingError> {
    Selector::parse(s).map_err(|e| ListingError::Selector {
        selector: s,
        message: e.to_string(),
    })
}

/// Extracts versions from listing markup, in document order.
///
/// Each `content-item` contributes the text of its first `text` descendant,
/// trimmed of surrounding whitespace.
pub fn parse_listing(markup: &str) -> Result<Vec<Version>, ListingError> {
    let item_sel = selector(ITEM_SELECTOR)?;
    let text_sel = selector(TEXT_SELECTOR)?;

    let document = Html::parse_document(markup);
    document
        .select(&item_sel)
        .enumerate()
        .map(|(index, item)| -> Result<Version, ListingError> {
            let text = item
                .select(&text_sel)
                .next()
                .ok_or(ListingError::MissingText { index })?;
            let label: String = text.text().collect();
            Ok(Version::new(label.trim()))
        })
        .collect()
}

/// GETs the listing page and parses it. Any failure is returned to the caller; no retry.
pub fn fetch_listing(url: &str, opts: &HttpOptions) -> Result<Vec<Version>> {
    let body = fetch::get_bytes(url, opts).context("fetch repository listing")?;
    let markup = String::from_utf8_lossy(&body);
    let versions = parse_listing(&markup).with_context(|| format!("parse listing from {url}"))?;
    tracing::info!(url, count = versions.len(), "listed versions");
    Ok(versions)
}
