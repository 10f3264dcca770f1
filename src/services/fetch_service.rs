use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{Feed, WriteStatus};
use crate::errors::{FeedhoundError, FeedhoundResult};
use crate::feed::{BuildOptions, Document, FeedNormalizer, FetchMetadata};
use crate::http::HttpClient;
use crate::urls::{feed_scheme_to_http, is_remote};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub include_content: bool,
    pub parse_links: bool,
    pub keep_source_order: bool,
    /// Copy the raw feed bytes here.
    pub output_file: Option<PathBuf>,
}

impl FetchOptions {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            include_content: self.include_content,
            parse_links: self.parse_links,
            keep_source_order: self.keep_source_order,
        }
    }
}

struct RawFeed {
    bytes: Vec<u8>,
    size: u64,
}

pub struct FetchService<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> FetchService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch a feed from a URL (`http:`, `https:`, `feed:`) or a local path.
    ///
    /// Never fails: transport and parse problems are reported in `Feed::error`.
    pub fn fetch(&self, location: &str, options: &FetchOptions) -> Feed {
        let raw = match self.read_location(location) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(location, error = %e, "feed fetch failed");
                let mut feed = Feed::new(location);
                feed.error = Some(match e {
                    FeedhoundError::HttpStatus(status) => status,
                    other => format!("While fetching {}: {}", location, other),
                });
                return feed;
            }
        };

        let write_status = options
            .output_file
            .as_deref()
            .map(|path| write_raw_feed(path, &raw.bytes));

        let document = Document::parse(&raw.bytes);
        let feed = FeedNormalizer::new(options.build_options()).build(
            &document,
            FetchMetadata {
                url: location.to_string(),
                size: raw.size,
                write_status,
            },
        );

        info!(
            location,
            feed_type = %feed.feed_type,
            items = feed.item_count,
            frequency = %feed.post_frequency,
            "feed fetched"
        );
        feed
    }

    fn read_location(&self, location: &str) -> FeedhoundResult<RawFeed> {
        if !is_remote(location) {
            debug!(location, "reading feed from disk");
            let bytes = std::fs::read(location)?;
            let size = bytes.len() as u64;
            return Ok(RawFeed { bytes, size });
        }

        let url = feed_scheme_to_http(location);
        let response = self.client.get(&url)?;
        if !response.is_success() {
            return Err(FeedhoundError::HttpStatus(status_line(response.status)));
        }

        let size = response
            .content_length
            .unwrap_or(response.body.len() as u64);
        Ok(RawFeed {
            bytes: response.body,
            size,
        })
    }
}

fn status_line(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason());
    match reason {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}

/// A failed write is recorded in the status, never propagated.
fn write_raw_feed(path: &Path, bytes: &[u8]) -> WriteStatus {
    match std::fs::write(path, bytes) {
        Ok(()) => WriteStatus {
            length: bytes.len(),
            file: Some(path.to_string_lossy().into_owned()),
            error: None,
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not write raw feed");
            WriteStatus {
                length: 0,
                file: None,
                error: Some(e.to_string()),
            }
        }
    }
}
