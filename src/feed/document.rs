//! Parsed feed documents, one variant per source format.
//!
//! RSS channels are read with the `rss` crate, which keeps native item
//! fields such as `<comments>` and `dc:date`. Everything else goes through
//! `feed-rs`, whose unified model is split back into format-specific shapes
//! so the normalizer can apply the accessor rules of each format by matching
//! on the variant.

use chrono::{DateTime, Utc};
use feed_rs::model::{self, FeedType as SourceFormat, Link};
use feed_rs::parser;
use tracing::debug;

use crate::domain::FeedType;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub guid: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    /// Dublin Core `dc:date`.
    pub dc_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    /// `content:encoded`
    pub content_encoded: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssChannel {
    pub title: Option<String>,
    pub last_build_date: Option<DateTime<Utc>>,
    pub items: Vec<RssItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub self_link: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub published: Option<DateTime<Utc>>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomFeed {
    pub title: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub entries: Vec<AtomEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Rss(RssChannel),
    Atom(AtomFeed),
    /// Bytes that did not resolve to RSS or Atom.
    Unknown,
}

impl Document {
    /// Parse raw bytes. Anything that is not RSS or Atom becomes [`Document::Unknown`].
    pub fn parse(bytes: &[u8]) -> Self {
        match rss::Channel::read_from(bytes) {
            Ok(channel) => return Document::Rss(rss_channel(&channel)),
            Err(e) => debug!(error = %e, "not an RSS channel, trying feed-rs"),
        }

        // Missing ids must stay missing; the normalizer owns the fallback chain.
        let parser = parser::Builder::new()
            .id_generator(|_links, _title, _uri| String::new())
            .build();

        match parser.parse(bytes) {
            Ok(feed) => Self::from_model(feed),
            Err(e) => {
                debug!(error = %e, "bytes did not parse as a feed");
                Document::Unknown
            }
        }
    }

    pub fn feed_type(&self) -> FeedType {
        match self {
            Document::Rss(_) => FeedType::Rss,
            Document::Atom(_) => FeedType::Atom,
            Document::Unknown => FeedType::Unknown,
        }
    }

    fn from_model(feed: model::Feed) -> Self {
        match feed.feed_type {
            SourceFormat::RSS0 | SourceFormat::RSS1 | SourceFormat::RSS2 => {
                Document::Rss(RssChannel {
                    title: feed.title.map(|t| t.content),
                    last_build_date: feed.updated,
                    items: feed.entries.into_iter().map(rss_item).collect(),
                })
            }
            SourceFormat::Atom => Document::Atom(AtomFeed {
                title: feed.title.map(|t| t.content),
                updated: feed.updated,
                entries: feed.entries.into_iter().map(atom_entry).collect(),
            }),
            _ => Document::Unknown,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn link_with_rel(links: &[Link], rels: &[&str]) -> Option<String> {
    links
        .iter()
        .find(|l| {
            l.rel
                .as_deref()
                .map(|rel| rels.iter().any(|r| rel.eq_ignore_ascii_case(r)))
                .unwrap_or(false)
        })
        .map(|l| l.href.clone())
}

fn primary_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel.eq_ignore_ascii_case("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
        .and_then(non_blank)
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn rss_channel(channel: &rss::Channel) -> RssChannel {
    RssChannel {
        title: non_blank(channel.title().to_string()),
        last_build_date: channel
            .last_build_date()
            .or(channel.pub_date())
            .and_then(parse_date),
        items: channel.items().iter().map(native_rss_item).collect(),
    }
}

fn native_rss_item(item: &rss::Item) -> RssItem {
    RssItem {
        title: item.title().map(str::to_string),
        link: item.link().map(str::to_string).and_then(non_blank),
        guid: item.guid().map(|g| g.value().to_string()).and_then(non_blank),
        pub_date: item.pub_date().and_then(parse_date),
        dc_date: item
            .dublin_core_ext()
            .and_then(|dc| dc.dates().first())
            .and_then(|d| parse_date(d)),
        description: item.description().map(str::to_string),
        content_encoded: item.content().map(str::to_string),
        comments: item.comments().map(str::to_string).and_then(non_blank),
    }
}

/// RSS that only `feed-rs` could read. It has no native comments field, so
/// comment links are taken from `rel` links instead.
fn rss_item(entry: model::Entry) -> RssItem {
    RssItem {
        title: entry.title.map(|t| t.content),
        link: primary_link(&entry.links),
        comments: link_with_rel(&entry.links, &["comments", "replies"]),
        guid: non_blank(entry.id),
        pub_date: entry.published,
        dc_date: entry.updated,
        description: entry.summary.map(|s| s.content),
        content_encoded: entry.content.and_then(|c| c.body),
    }
}

fn atom_entry(entry: model::Entry) -> AtomEntry {
    AtomEntry {
        title: entry.title.map(|t| t.content),
        link: primary_link(&entry.links),
        self_link: link_with_rel(&entry.links, &["self"]),
        comments: link_with_rel(&entry.links, &["replies", "comments"]),
        id: non_blank(entry.id),
        updated: entry.updated,
        published: entry.published,
        content: entry.content.and_then(|c| c.body),
        summary: entry.summary.map(|s| s.content),
    }
}
