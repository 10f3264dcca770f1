use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Post, PostFrequencyStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Rss,
    Atom,
    Unknown,
}

impl FeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::Rss => "rss",
            FeedType::Atom => "atom",
            FeedType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FeedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of copying the raw feed bytes to a caller-chosen path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteStatus {
    pub length: usize,
    pub file: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub url: String,
    pub title: Option<String>,
    pub item_count: usize,
    pub feed_type: FeedType,
    pub fetched: bool,
    pub error: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub post_frequency: String,
    pub post_frequency_stats: PostFrequencyStats,
    pub items: Vec<Post>,
    pub most_recent_entry: Option<DateTime<Utc>>,
    pub write_status: Option<WriteStatus>,
}

impl Feed {
    pub fn new(url: impl Into<String>) -> Self {
        let stats = PostFrequencyStats::default();
        Self {
            url: url.into(),
            title: None,
            item_count: 0,
            feed_type: FeedType::Unknown,
            fetched: false,
            error: None,
            published_date: None,
            post_frequency: stats.label.clone(),
            post_frequency_stats: stats,
            items: Vec::new(),
            most_recent_entry: None,
            write_status: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_ok(&self) -> bool {
        !self.has_error()
    }

    pub fn is_rss(&self) -> bool {
        self.feed_type == FeedType::Rss
    }

    pub fn is_atom(&self) -> bool {
        self.feed_type == FeedType::Atom
    }

    /// True when the raw bytes were written to the requested output file.
    pub fn file_cached(&self) -> bool {
        self.write_status
            .as_ref()
            .map(|status| status.length > 0)
            .unwrap_or(false)
    }
}
