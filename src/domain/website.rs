use serde::{Deserialize, Serialize};

use crate::domain::{DiscoveryFailure, DiscoveryResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteFeed {
    pub name: String,
    pub url: String,
}

/// Summary of a site: its title plus the feeds discovery found on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub url: String,
    pub title: Option<String>,
    pub feeds: Vec<WebsiteFeed>,
    pub error: Option<DiscoveryFailure>,
}

impl Website {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            feeds: Vec::new(),
            error: None,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_error(mut self, error: DiscoveryFailure) -> Self {
        self.error = Some(error);
        self
    }

    /// Copy the discovered feeds over; a failed discovery becomes the site error.
    pub fn with_discovery(mut self, result: DiscoveryResult) -> Self {
        self.feeds = result
            .feeds
            .into_values()
            .map(|feed| WebsiteFeed {
                name: feed.title,
                url: feed.url,
            })
            .collect();
        if let Some(error) = result.error {
            self.error = Some(error);
        }
        self
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
