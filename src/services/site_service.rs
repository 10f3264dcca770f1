use crate::discovery::{DiscoveryOptions, FeedHunter};
use crate::domain::{DiscoveryErrorKind, DiscoveryFailure, DiscoveryResult, Website};
use crate::http::HttpClient;

const CONNECTION_HINT: &str = "Unable to connect. Try HTTPS?";

/// Site-level entry points: feed discovery and a website summary.
pub struct SiteService<C: HttpClient> {
    hunter: FeedHunter<C>,
}

impl<C: HttpClient> SiteService<C> {
    pub fn new(client: C) -> Self {
        Self {
            hunter: FeedHunter::new(client),
        }
    }

    pub fn discover(&self, url: &str, options: &DiscoveryOptions) -> DiscoveryResult {
        self.hunter.discover(url, options)
    }

    /// Fetch the page once, then report its title and the feeds found on it.
    pub fn inspect(&self, url: &str, options: &DiscoveryOptions) -> Website {
        let site = Website::new(url);
        match self.hunter.fetch_page(url) {
            Ok(page) => {
                let result = self.hunter.discover_in_page(&page.url, &page.html, options);
                site.with_title(page.title()).with_discovery(result)
            }
            Err(e) if e.is_connection() => site.with_error(DiscoveryFailure {
                message: CONNECTION_HINT.to_string(),
                kind: DiscoveryErrorKind::Connection,
            }),
            Err(e) => site.with_error(DiscoveryFailure {
                message: e.to_string(),
                kind: DiscoveryErrorKind::General,
            }),
        }
    }
}
