use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::errors::{FeedhoundError, FeedhoundResult};
use crate::http::traits::HttpClient;

pub const MAX_REDIRECT_HOPS: usize = 10;

/// Content types that mark a response as a feed: RSS/Atom or generic XML.
pub static FEED_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)application/(rss|atom|rdf)\+xml|application/xml|text/xml")
        .expect("feed content-type pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Feed,
    Html,
    None,
}

/// Classifies a URI as feed, HTML page or nothing from a HEAD request.
pub struct ContentTypeProbe<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> ContentTypeProbe<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Never fails: timeouts, exhausted redirect hops and error statuses all map to `None`.
    pub fn classify(&self, uri: &str) -> ContentKind {
        match self.follow(uri, 0) {
            Ok(kind) => kind,
            Err(e) => {
                debug!(uri, error = %e, "content-type probe failed");
                ContentKind::None
            }
        }
    }

    fn follow(&self, uri: &str, hops: usize) -> FeedhoundResult<ContentKind> {
        let response = self.client.head(uri)?;

        if response.is_redirect() {
            let location = response
                .location
                .as_deref()
                .ok_or_else(|| FeedhoundError::HttpStatus(format!("{} without Location", response.status)))?;
            if hops >= MAX_REDIRECT_HOPS {
                return Err(FeedhoundError::TooManyRedirects(uri.to_string()));
            }
            let target = Url::parse(uri)?.join(location)?;
            debug!(from = uri, to = %target, hop = hops + 1, "following redirect");
            return self.follow(target.as_str(), hops + 1);
        }

        if !response.is_success() {
            return Ok(ContentKind::None);
        }

        let is_feed = response
            .content_type
            .as_deref()
            .map(|ct| FEED_CONTENT_TYPE.is_match(ct))
            .unwrap_or(false);

        Ok(if is_feed {
            ContentKind::Feed
        } else {
            ContentKind::Html
        })
    }
}
