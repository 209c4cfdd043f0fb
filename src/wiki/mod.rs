//! Reference image fetching from the wiki.
//!
//! Every entry of the image-bearing categories is looked up on the wiki's
//! `imageinfo` API and downloaded into `<image_folder>/<category>/<value>.png`.
//! Failures never stop the batch: each entry ends up saved, skipped, unresolved
//! or failed, and the [`FetchReport`] summarizes the run.

pub mod candidates;
pub mod client;
pub mod retry;

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::lang::{Category, LangMap, LanguageSet};

pub use client::WikiClient;
pub use retry::RetryPolicy;

/// Categories that carry a rendered image on their slides.
pub const IMAGE_CATEGORIES: [Category; 4] = [
    Category::Block,
    Category::Entity,
    Category::Item,
    Category::Effect,
];

/// Wiki request failures.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused or TLS handshake rejected; the wiki does this when throttling.
    #[error("connection or TLS handshake failed: {0}")]
    Handshake(String),
    /// No response within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Server answered with an error status.
    #[error("{0}")]
    Http(String),
    /// Any other request failure.
    #[error("request failed: {0}")]
    Request(String),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// What: Classify a `reqwest` error.
    ///
    /// Inputs:
    /// - `err`: Error returned by `reqwest`.
    ///
    /// Output:
    /// - `Timeout` for timeouts, `Handshake` for connection and TLS failures,
    ///   `Request` otherwise.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let text = err.to_string();
        if err.is_timeout() {
            Self::Timeout(text)
        } else if err.is_connect() || mentions_tls(err) {
            Self::Handshake(text)
        } else {
            Self::Request(text)
        }
    }

    /// Whether a retry could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Handshake(_) | Self::Timeout(_))
    }
}

/// Whether any error in the source chain comes from the TLS layer.
fn mentions_tls(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        let text = e.to_string().to_ascii_lowercase();
        if ["tls", "ssl", "certificate", "handshake"]
            .iter()
            .any(|needle| text.contains(needle))
        {
            return true;
        }
        current = e.source();
    }
    false
}

/// Outcome of an image batch.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FetchReport {
    /// Newly written files.
    pub saved: Vec<String>,
    /// Files already present.
    pub skipped: Vec<String>,
    /// Entries with no image on the wiki, or whose transient failures outlasted the retries.
    pub unresolved: Vec<String>,
    /// Entries aborted by a permanent error.
    pub failed: Vec<String>,
}

impl FetchReport {
    /// Whether every entry now has an image on disk.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.failed.is_empty()
    }

    /// What: Log the end-of-run summary, enumerating every unresolved and failed file.
    pub fn log_summary(&self) {
        info!(
            saved = self.saved.len(),
            skipped = self.skipped.len(),
            unresolved = self.unresolved.len(),
            failed = self.failed.len(),
            "image batch finished"
        );
        if self.is_complete() {
            info!("all images downloaded");
            return;
        }
        for name in &self.unresolved {
            warn!(file = %name, "image not found");
        }
        for name in &self.failed {
            error!(file = %name, "image download failed");
        }
    }

    /// Record a request failure as unresolved (transient) or failed (permanent).
    fn record_error(&mut self, name: String, err: &FetchError) {
        if err.is_transient() {
            self.unresolved.push(name);
        } else {
            self.failed.push(name);
        }
    }
}

/// One image to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTarget {
    /// Owning category.
    pub category: Category,
    /// Localization key.
    pub key: String,
    /// Reference display string.
    pub value: String,
}

/// What: Entries of the reference locale that need an image.
///
/// Inputs:
/// - `set`: Normalized locales.
/// - `categories`: Requested categories; those without images are ignored.
///
/// Output:
/// - Targets grouped by category, keys ascending within a category.
#[must_use]
pub fn image_targets(set: &LanguageSet, categories: &[Category]) -> Vec<ImageTarget> {
    let strings = &set.reference().strings;
    IMAGE_CATEGORIES
        .iter()
        .filter(|c| categories.contains(c))
        .flat_map(|&category| {
            strings
                .iter()
                .filter(move |(key, _)| category.accepts(key))
                .map(move |(key, value)| ImageTarget {
                    category,
                    key: key.clone(),
                    value: value.clone(),
                })
        })
        .collect()
}

/// Options of one image batch.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions<'a> {
    /// Destination folder.
    pub image_dir: &'a Path,
    /// Download again even when the file exists.
    pub ignore_saved_image: bool,
    /// Key -> wiki file name overrides.
    pub mapping: &'a LangMap,
}

/// What: Fetch every target's image sequentially.
///
/// Inputs:
/// - `client`: Wiki client.
/// - `targets`: Entries to fetch.
/// - `options`: Destination, overwrite flag and file name overrides.
///
/// Output:
/// - `FetchReport` classifying every target.
///
/// Details:
/// - Existing files are skipped unless `ignore_saved_image` is set.
/// - Candidates from [`candidates::candidate_file_names`] are looked up in order;
///   the first existing wiki file is downloaded.
/// - No error aborts the batch.
pub async fn fetch_images(
    client: &WikiClient,
    targets: &[ImageTarget],
    options: FetchOptions<'_>,
) -> FetchReport {
    let mut report = FetchReport::default();
    for target in targets {
        let path = candidates::image_path(options.image_dir, target.category, &target.value);
        let name = candidates::image_file_name(&target.value);

        if path.is_file() && !options.ignore_saved_image {
            info!(file = %name, "image already exists");
            report.skipped.push(name);
            continue;
        }

        let names = candidates::candidate_file_names(
            target.category,
            &target.key,
            &target.value,
            options.mapping,
        );
        let url = match resolve_url(client, &names).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                warn!(file = %name, key = %target.key, "image not found on wiki");
                report.unresolved.push(name);
                continue;
            }
            Err(err) => {
                report.record_error(name, &err);
                continue;
            }
        };

        info!(file = %name, url = %url, "fetching image");
        match client.download(&url).await {
            Ok(bytes) => match write_image(&path, &bytes) {
                Ok(()) => {
                    info!(file = %name, "image saved");
                    report.saved.push(name);
                }
                Err(err) => {
                    error!(file = %name, error = %err, "failed to write image");
                    report.failed.push(name);
                }
            },
            Err(err) => report.record_error(name, &err),
        }
    }
    report
}

/// First URL found among `names`.
async fn resolve_url(
    client: &WikiClient,
    names: &[String],
) -> Result<Option<String>, FetchError> {
    for name in names {
        if let Some(url) = client.image_url(name).await? {
            return Ok(Some(url));
        }
    }
    Ok(None)
}

/// Write image bytes, creating the category folder as needed.
fn write_image(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}
