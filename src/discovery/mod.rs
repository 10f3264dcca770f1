//! Feed discovery for a single web page.
//!
//! Several independent heuristics each produce a map of candidate feeds keyed
//! by canonical URL. The maps are folded together in [`MERGE_ORDER`], so a
//! feed found by more than one heuristic keeps the title (and URL) of the
//! most trusted one.

pub mod body_links;
pub mod header_links;
pub mod hunter;
pub mod options;
pub mod providers;
pub mod wellknown;

use std::collections::BTreeMap;

use scraper::ElementRef;
use url::Url;

use crate::domain::DiscoveredFeed;
use crate::urls::canonicalize;

pub use hunter::FeedHunter;
pub use options::{DiscoveryOptions, SearchMode};

/// Feeds found by one heuristic, keyed by canonical URL.
pub type SourceMap = BTreeMap<String, DiscoveredFeed>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverySource {
    /// `<link rel="alternate">` elements in the page head.
    HeaderLinks,
    /// Anchors matching a known syndication or aggregator URL pattern.
    Providers,
    /// Conventional feed paths probed on the page's origin.
    WellKnownLocations,
    /// Every anchor on the page, probed one by one.
    BodyLinks,
}

/// Fold order, lowest precedence first. Later sources overwrite earlier ones
/// on the same canonical URL.
pub const MERGE_ORDER: [DiscoverySource; 4] = [
    DiscoverySource::BodyLinks,
    DiscoverySource::WellKnownLocations,
    DiscoverySource::Providers,
    DiscoverySource::HeaderLinks,
];

fn precedence(source: DiscoverySource) -> usize {
    MERGE_ORDER
        .iter()
        .position(|s| *s == source)
        .unwrap_or(MERGE_ORDER.len())
}

/// Merge per-source maps in [`MERGE_ORDER`], whatever order they were produced in.
pub fn merge(mut sources: Vec<(DiscoverySource, SourceMap)>) -> SourceMap {
    sources.sort_by_key(|(source, _)| precedence(*source));
    sources
        .into_iter()
        .fold(SourceMap::new(), |mut merged, (_, found)| {
            merged.extend(found);
            merged
        })
}

/// Insert a feed under its canonical key. URLs without a host are dropped.
pub(crate) fn insert_feed(map: &mut SourceMap, mut url: Url, title: String) {
    providers::force_provider_query(&mut url);
    if let Some(key) = canonicalize(url.as_str()) {
        map.insert(
            key,
            DiscoveredFeed {
                url: url.to_string(),
                title,
            },
        );
    }
}

/// Anchor title attribute, else its trimmed text.
pub(crate) fn anchor_title(anchor: &ElementRef<'_>) -> Option<String> {
    if let Some(title) = anchor.value().attr("title") {
        let title = title.trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }
    let text = anchor.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
