//! Anchors pointing at well-known syndication redirectors and aggregators.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::discovery::{anchor_title, insert_feed, SourceMap};
use crate::urls::resolve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrefRule {
    /// The anchor's href is the feed URL.
    Direct,
    /// The feed URL follows the matched prefix (aggregator subscribe links).
    AfterMatch,
}

#[derive(Debug, Clone, Copy)]
pub struct ProviderPattern {
    pub name: &'static str,
    pub pattern: &'static str,
    pub rule: HrefRule,
}

/// Matched in order; a later provider overwrites an earlier one on the same URL.
pub const PROVIDER_PATTERNS: &[ProviderPattern] = &[
    ProviderPattern {
        name: "Feedly",
        pattern: r"^https?://(www\.)?feedly\.com/i/subscription/feed/",
        rule: HrefRule::AfterMatch,
    },
    ProviderPattern {
        name: "FeedBurner",
        pattern: r"feedburner",
        rule: HrefRule::Direct,
    },
    ProviderPattern {
        name: "Site",
        pattern: r"^/(feed|rss)",
        rule: HrefRule::Direct,
    },
    ProviderPattern {
        name: "FeedBlitz",
        pattern: FEEDBLITZ_PATTERN,
        rule: HrefRule::Direct,
    },
];

const FEEDBLITZ_PATTERN: &str = r"^https?://feeds\.feedblitz\.com/";
/// Query forced onto FeedBlitz URLs so repeated runs land on one key.
const FEEDBLITZ_QUERY: &str = "x=1";

static COMPILED: LazyLock<Vec<(ProviderPattern, Regex)>> = LazyLock::new(|| {
    PROVIDER_PATTERNS
        .iter()
        .map(|p| {
            let regex = Regex::new(p.pattern).expect("provider pattern is valid");
            (*p, regex)
        })
        .collect()
});

static FEEDBLITZ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FEEDBLITZ_PATTERN).expect("feedblitz pattern is valid"));

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

pub fn is_feedblitz_url(url: &Url) -> bool {
    FEEDBLITZ.is_match(url.as_str())
}

/// Apply provider-specific URL rewrites. Only FeedBlitz has one.
pub fn force_provider_query(url: &mut Url) {
    if is_feedblitz_url(url) && url.query() != Some(FEEDBLITZ_QUERY) {
        url.set_query(Some(FEEDBLITZ_QUERY));
    }
}

pub fn find(page_url: &Url, page: &Html) -> SourceMap {
    let mut found = SourceMap::new();

    for (provider, regex) in COMPILED.iter() {
        let mut index = 0;
        for anchor in page.select(&ANCHORS) {
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                continue;
            };
            let Some(matched) = regex.find(href) else {
                continue;
            };

            let url = match provider.rule {
                HrefRule::Direct => resolve(page_url, href),
                HrefRule::AfterMatch => Url::parse(&href[matched.end()..]).map_err(Into::into),
            };
            let url = match url {
                Ok(url) => url,
                Err(e) => {
                    debug!(provider = provider.name, href, error = %e, "skipping provider link");
                    continue;
                }
            };

            let title = anchor_title(&anchor).unwrap_or_else(|| {
                let placeholder = format!("{} Feed {}", provider.name, index);
                index += 1;
                placeholder
            });

            insert_feed(&mut found, url, title);
        }
    }

    found
}
