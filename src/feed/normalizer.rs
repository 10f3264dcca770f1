use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::domain::{Feed, Post, WriteStatus};
use crate::feed::document::{AtomEntry, Document, RssItem};
use crate::feed::frequency::analyze;
use crate::feed::sanitizer::sanitize_basic;
use crate::urls::canonicalize;

pub const NULL_ITEMS_ERROR: &str = "Null Items found. Not an RSS feed?";

static CONTENT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("content URL pattern is valid"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fill `Post::content` with sanitized entry content.
    pub include_content: bool,
    /// Extract and canonicalize the URLs found in entry content.
    pub parse_links: bool,
    /// Keep entries in document order instead of newest-first.
    pub keep_source_order: bool,
}

/// What the fetch step knows about the bytes it handed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchMetadata {
    pub url: String,
    pub size: u64,
    pub write_status: Option<WriteStatus>,
}

/// Turns a parsed [`Document`] into a [`Feed`] of ordered [`Post`]s.
#[derive(Debug, Clone, Default)]
pub struct FeedNormalizer {
    options: BuildOptions,
}

impl FeedNormalizer {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Never fails; an unrecognized document yields a feed with `error` set and no items.
    pub fn build(&self, document: &Document, metadata: FetchMetadata) -> Feed {
        let mut feed = Feed::new(metadata.url);
        feed.write_status = metadata.write_status;
        feed.feed_type = document.feed_type();

        match document {
            Document::Rss(channel) => {
                feed.title = channel.title.clone();
                feed.published_date = channel.last_build_date;
                feed.items = channel.items.iter().map(|i| self.rss_post(i)).collect();
            }
            Document::Atom(atom) => {
                feed.title = atom.title.clone();
                feed.published_date = atom.updated;
                feed.items = atom.entries.iter().map(|e| self.atom_post(e)).collect();
            }
            Document::Unknown => {
                feed.error = Some(NULL_ITEMS_ERROR.to_string());
            }
        }

        // An undated entry means the feed is not serial; keep its order as published.
        let serial = feed.items.iter().all(|p| p.published_date.is_some());
        if serial && !self.options.keep_source_order {
            feed.items
                .sort_by(|a, b| b.published_date.cmp(&a.published_date));
        }

        feed.item_count = feed.items.len();
        feed.most_recent_entry = feed.items.first().and_then(|p| p.published_date);

        let mut stats = analyze(&feed.items);
        stats.size = metadata.size;
        feed.post_frequency = stats.label.clone();
        feed.post_frequency_stats = stats;
        feed.fetched = true;

        feed
    }

    fn rss_post(&self, item: &RssItem) -> Post {
        let raw_content = item
            .content_encoded
            .as_deref()
            .or(item.description.as_deref());

        self.post(
            EntryFields {
                url: item.link.as_deref(),
                title: item.title.as_deref(),
                published: item.pub_date.or(item.dc_date),
                comments: item.comments.as_deref(),
                native_id: item.guid.as_deref(),
            },
            raw_content,
        )
    }

    fn atom_post(&self, entry: &AtomEntry) -> Post {
        let raw_content = entry.content.as_deref().or(entry.summary.as_deref());

        self.post(
            EntryFields {
                url: entry.link.as_deref(),
                title: entry.title.as_deref(),
                published: entry.updated.or(entry.published),
                comments: entry.comments.as_deref().or(entry.self_link.as_deref()),
                native_id: entry.id.as_deref(),
            },
            raw_content,
        )
    }

    fn post(&self, fields: EntryFields<'_>, raw_content: Option<&str>) -> Post {
        let title = fields.title.map(sanitize_basic);
        let url = fields.url.map(|u| u.trim().to_string());

        let content = if self.options.include_content {
            raw_content.map(sanitize_basic)
        } else {
            None
        };
        let links = if self.options.parse_links {
            raw_content.map(extract_links).unwrap_or_default()
        } else {
            Vec::new()
        };

        let canonical_id = canonical_id(fields.native_id, url.as_deref(), title.as_deref());

        Post {
            url,
            title,
            published_date: fields.published,
            content,
            links,
            comments_url: fields.comments.map(|c| c.to_string()),
            canonical_id,
            error: None,
        }
    }
}

struct EntryFields<'a> {
    url: Option<&'a str>,
    title: Option<&'a str>,
    published: Option<DateTime<Utc>>,
    comments: Option<&'a str>,
    native_id: Option<&'a str>,
}

/// First non-blank of: feed-native id, post URL, post title.
///
/// Entries carrying none of the three get no id at all; nothing is hashed or
/// synthesized in their place.
pub fn canonical_id(
    native_id: Option<&str>,
    url: Option<&str>,
    title: Option<&str>,
) -> Option<String> {
    [native_id, url, title]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.trim().is_empty())
        .map(|id| id.to_string())
}

/// Canonical keys of every URL in `content`, deduplicated, in order of appearance.
pub fn extract_links(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    CONTENT_URL
        .find_iter(content)
        .map(|m| {
            m.as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?', ')'])
                .replace("&amp;", "&")
        })
        .filter_map(|url| canonicalize(&url))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
