use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredFeed {
    /// Absolute feed URL, ready to fetch.
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryErrorKind {
    /// DNS or connect failure; usually fixed by trying another scheme or host.
    Connection,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFailure {
    pub message: String,
    #[serde(rename = "error_type")]
    pub kind: DiscoveryErrorKind,
}

/// Feeds found for one page, keyed by canonical URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub feeds: BTreeMap<String, DiscoveredFeed>,
    pub error: Option<DiscoveryFailure>,
}

impl DiscoveryResult {
    pub fn from_feeds(feeds: BTreeMap<String, DiscoveredFeed>) -> Self {
        Self { feeds, error: None }
    }

    pub fn failed(message: impl Into<String>, kind: DiscoveryErrorKind) -> Self {
        Self {
            feeds: BTreeMap::new(),
            error: Some(DiscoveryFailure {
                message: message.into(),
                kind,
            }),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn get(&self, canonical: &str) -> Option<&DiscoveredFeed> {
        self.feeds.get(canonical)
    }

    pub fn title_for(&self, canonical: &str) -> Option<&str> {
        self.get(canonical).map(|feed| feed.title.as_str())
    }
}
