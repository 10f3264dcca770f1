use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::discovery::options::{DiscoveryOptions, SearchMode};
use crate::discovery::{
    body_links, header_links, insert_feed, merge, providers, wellknown, DiscoverySource,
    SourceMap,
};
use crate::domain::{DiscoveryErrorKind, DiscoveryResult};
use crate::errors::{FeedhoundError, FeedhoundResult};
use crate::http::{ContentKind, ContentTypeProbe, HttpClient};

/// How deep a scan sits. Only a top-level scan may re-scan well-known HTML pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDepth {
    Top,
    Nested,
}

/// A page fetched and parsed for scanning.
pub struct FetchedPage {
    pub url: String,
    pub html: Html,
}

impl FetchedPage {
    pub fn title(&self) -> Option<String> {
        let selector = scraper::Selector::parse("title").ok()?;
        let title = self
            .html
            .select(&selector)
            .next()?
            .text()
            .collect::<String>();
        let title = title.trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }
}

/// Finds the feeds a web page advertises or hides.
pub struct FeedHunter<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> FeedHunter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch `page_url` and run discovery on it. Failures are reported in the result.
    pub fn discover(&self, page_url: &str, options: &DiscoveryOptions) -> DiscoveryResult {
        match self.fetch_page(page_url) {
            Ok(page) => self.discover_in_page(&page.url, &page.html, options),
            Err(e) => failure(&e),
        }
    }

    /// Run discovery on an already parsed page.
    pub fn discover_in_page(
        &self,
        page_url: &str,
        page: &Html,
        options: &DiscoveryOptions,
    ) -> DiscoveryResult {
        match self.scan(page_url, page, options, ScanDepth::Top) {
            Ok(feeds) => {
                info!(page = page_url, feeds = feeds.len(), "discovery finished");
                DiscoveryResult::from_feeds(feeds)
            }
            Err(e) => failure(&e),
        }
    }

    pub fn fetch_page(&self, url: &str) -> FeedhoundResult<FetchedPage> {
        let response = self.client.get(url)?;
        if !response.is_success() {
            return Err(FeedhoundError::HttpStatus(format!(
                "{} for {}",
                response.status, url
            )));
        }
        let final_url = if response.url.is_empty() {
            url.to_string()
        } else {
            response.url.clone()
        };
        Ok(FetchedPage {
            url: final_url,
            html: Html::parse_document(&response.text()),
        })
    }

    fn scan(
        &self,
        page_url: &str,
        page: &Html,
        options: &DiscoveryOptions,
        depth: ScanDepth,
    ) -> FeedhoundResult<SourceMap> {
        let base = Url::parse(page_url)?;

        let mut sources = vec![
            (
                DiscoverySource::HeaderLinks,
                header_links::find(&base, page, options.strict_header_links),
            ),
            (DiscoverySource::Providers, providers::find(&base, page)),
        ];
        if options.search_wellknown_locations {
            sources.push((
                DiscoverySource::WellKnownLocations,
                self.probe_wellknown(&base, options, depth),
            ));
        }
        if options.parse_body_links {
            sources.push((DiscoverySource::BodyLinks, self.probe_body_links(&base, page)));
        }

        Ok(merge(sources))
    }

    fn probe_wellknown(&self, base: &Url, options: &DiscoveryOptions, depth: ScanDepth) -> SourceMap {
        let probe = ContentTypeProbe::new(&self.client);
        let mut found = SourceMap::new();

        for candidate in wellknown::candidates(base) {
            match probe.classify(candidate.as_str()) {
                ContentKind::Feed => {
                    debug!(url = %candidate, "well-known location is a feed");
                    let title = candidate.to_string();
                    insert_feed(&mut found, candidate, title);
                }
                ContentKind::Html => {
                    if !may_rescan(options, depth) {
                        continue;
                    }
                    match self.rescan(&candidate, options) {
                        Ok(nested) => found.extend(nested),
                        Err(e) => warn!(url = %candidate, error = %e, "well-known page scan failed"),
                    }
                }
                ContentKind::None => {}
            }
        }

        found
    }

    /// One extra scan of an HTML page found at a well-known location.
    fn rescan(&self, candidate: &Url, options: &DiscoveryOptions) -> FeedhoundResult<SourceMap> {
        debug!(url = %candidate, "scanning well-known page for feeds");
        let page = self.fetch_page(candidate.as_str())?;
        self.scan(&page.url, &page.html, &options.nested(), ScanDepth::Nested)
    }

    fn probe_body_links(&self, base: &Url, page: &Html) -> SourceMap {
        let probe = ContentTypeProbe::new(&self.client);
        let mut found = SourceMap::new();

        for candidate in body_links::candidates(base, page) {
            if probe.classify(candidate.url.as_str()) == ContentKind::Feed {
                insert_feed(&mut found, candidate.url, candidate.title);
            }
        }

        found
    }
}

fn may_rescan(options: &DiscoveryOptions, depth: ScanDepth) -> bool {
    depth == ScanDepth::Top && options.advanced_search_mode != SearchMode::Simple
}

fn failure(err: &FeedhoundError) -> DiscoveryResult {
    if err.is_connection() {
        warn!(error = %err, "discovery could not connect");
        DiscoveryResult::failed(format!("Try HTTPS or www? {}", err), DiscoveryErrorKind::Connection)
    } else {
        warn!(error = %err, "discovery failed");
        DiscoveryResult::failed(err.to_string(), DiscoveryErrorKind::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockHttpClient};
    use mockall::predicate::eq;

    fn html(url: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            url: url.to_string(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.as_bytes().to_vec(),
            ..HttpResponse::default()
        }
    }

    fn head(status: u16, content_type: &str) -> HttpResponse {
        HttpResponse {
            status,
            content_type: Some(content_type.to_string()),
            ..HttpResponse::default()
        }
    }

    fn not_found() -> HttpResponse {
        head(404, "text/html")
    }

    fn options_without_wellknown() -> DiscoveryOptions {
        DiscoveryOptions {
            search_wellknown_locations: false,
            ..DiscoveryOptions::default()
        }
    }

    #[test]
    fn test_header_title_beats_wellknown() {
        let mut client = MockHttpClient::new();
        client.expect_get().with(eq("https://example.com/")).returning(|url| {
            Ok(html(
                url,
                r#"<html><head><link rel="alternate" type="application/rss+xml"
                    title="Header Title" href="/feed/"></head><body></body></html>"#,
            ))
        });
        client.expect_head().returning(|url| {
            Ok(if url == "https://example.com/feed/" {
                head(200, "application/rss+xml")
            } else {
                not_found()
            })
        });

        let hunter = FeedHunter::new(client);
        let result = hunter.discover("https://example.com/", &DiscoveryOptions::default());

        assert!(!result.has_error());
        assert_eq!(result.len(), 1);
        assert_eq!(result.title_for("example.com/feed"), Some("Header Title"));
    }

    #[test]
    fn test_wellknown_feed_found_without_header_links() {
        let mut client = MockHttpClient::new();
        client
            .expect_get()
            .returning(|url| Ok(html(url, "<html><head></head><body>No feeds here</body></html>")));
        client.expect_head().returning(|url| {
            Ok(if url == "https://example.com/rss" {
                head(200, "text/xml")
            } else {
                not_found()
            })
        });

        let hunter = FeedHunter::new(client);
        let result = hunter.discover("https://example.com/", &DiscoveryOptions::default());

        assert_eq!(result.len(), 1);
        let feed = result.get("example.com/rss").unwrap();
        assert_eq!(feed.url, "https://example.com/rss");
    }

    #[test]
    fn test_wellknown_html_rescanned_once() {
        let mut client = MockHttpClient::new();
        client
            .expect_get()
            .with(eq("https://example.com/"))
            .times(1)
            .returning(|url| Ok(html(url, "<html><body><p>Welcome</p></body></html>")));
        client
            .expect_get()
            .with(eq("https://example.com/blog"))
            .times(1)
            .returning(|url| {
                Ok(html(
                    url,
                    r#"<html><body>
                        <a href="https://example.com/">Home</a>
                        <a href="/blog/feed.xml">Blog feed</a>
                    </body></html>"#,
                ))
            });
        client.expect_head().returning(|url| {
            Ok(match url {
                "https://example.com/blog" | "https://example.com/" => head(200, "text/html"),
                "https://example.com/blog/feed.xml" => head(200, "application/atom+xml"),
                _ => not_found(),
            })
        });

        let hunter = FeedHunter::new(client);
        let result = hunter.discover("https://example.com/", &DiscoveryOptions::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result.title_for("example.com/blog/feed.xml"), Some("Blog feed"));
    }

    #[test]
    fn test_simple_mode_skips_rescan() {
        let mut client = MockHttpClient::new();
        client
            .expect_get()
            .with(eq("https://example.com/"))
            .times(1)
            .returning(|url| Ok(html(url, "<html><body></body></html>")));
        client.expect_head().returning(|_| Ok(head(200, "text/html")));

        let hunter = FeedHunter::new(client);
        let options = DiscoveryOptions {
            advanced_search_mode: SearchMode::Simple,
            ..DiscoveryOptions::default()
        };
        let result = hunter.discover("https://example.com/", &options);

        assert!(!result.has_error());
        assert!(result.is_empty());
    }

    #[test]
    fn test_failing_wellknown_candidate_does_not_stop_others() {
        let mut client = MockHttpClient::new();
        client
            .expect_get()
            .with(eq("https://example.com/"))
            .returning(|url| Ok(html(url, "<html><body></body></html>")));
        client
            .expect_get()
            .with(eq("https://example.com/feeds"))
            .returning(|_| Err(FeedhoundError::HttpStatus("500 Internal Server Error".to_string())));
        client.expect_head().returning(|url| match url {
            "https://example.com/feed/" => Err(FeedhoundError::Connection("reset".to_string())),
            "https://example.com/feeds" => Ok(head(200, "text/html")),
            "https://feeds.example.com/" => Ok(head(200, "application/rss+xml")),
            _ => Ok(not_found()),
        });

        let hunter = FeedHunter::new(client);
        let result = hunter.discover("https://example.com/", &DiscoveryOptions::default());

        assert!(!result.has_error());
        assert_eq!(result.len(), 1);
        assert!(result.get("feeds.example.com").is_some());
    }

    #[test]
    fn test_body_links_probed_when_enabled() {
        let mut client = MockHttpClient::new();
        client.expect_head().returning(|url| {
            Ok(if url.ends_with(".xml") {
                head(200, "application/rss+xml")
            } else {
                head(200, "text/html")
            })
        });

        let page = Html::parse_document(
            r#"<html><body>
                <a href="/about">About</a>
                <a href="/podcast.xml">Podcast</a>
                <a href="/podcast.xml">Podcast</a>
            </body></html>"#,
        );
        let hunter = FeedHunter::new(client);
        let options = DiscoveryOptions {
            parse_body_links: true,
            ..options_without_wellknown()
        };
        let result = hunter.discover_in_page("https://example.com/", &page, &options);

        assert_eq!(result.len(), 1);
        assert_eq!(result.title_for("example.com/podcast.xml"), Some("Podcast"));
    }

    #[test]
    fn test_body_link_probes_capped() {
        let mut client = MockHttpClient::new();
        client
            .expect_head()
            .times(body_links::MAX_BODY_LINKS)
            .returning(|_| Ok(not_found()));

        let body: String = (0..400)
            .map(|i| format!("<a href=\"/p/{}\">p{}</a>", i, i))
            .collect();
        let page = Html::parse_document(&body);
        let hunter = FeedHunter::new(client);
        let options = DiscoveryOptions {
            parse_body_links: true,
            ..options_without_wellknown()
        };

        let result = hunter.discover_in_page("https://example.com/", &page, &options);
        assert!(result.is_empty());
    }

    #[test]
    fn test_body_links_off_by_default() {
        // No expectations: any HTTP call would fail the test.
        let client = MockHttpClient::new();
        let page = Html::parse_document(r#"<a href="/podcast.xml">Podcast</a>"#);
        let hunter = FeedHunter::new(client);

        let result = hunter.discover_in_page("https://example.com/", &page, &options_without_wellknown());
        assert!(result.is_empty());
    }

    #[test]
    fn test_connection_failure_is_reported() {
        let mut client = MockHttpClient::new();
        client
            .expect_get()
            .returning(|_| Err(FeedhoundError::Connection("failed to lookup address".to_string())));

        let hunter = FeedHunter::new(client);
        let result = hunter.discover("http://no-such-host.invalid/", &DiscoveryOptions::default());

        let error = result.error.unwrap();
        assert_eq!(error.kind, DiscoveryErrorKind::Connection);
        assert!(error.message.starts_with("Try HTTPS or www?"));
    }

    #[test]
    fn test_other_failures_are_general() {
        let mut client = MockHttpClient::new();
        client.expect_get().returning(|url| {
            Ok(HttpResponse {
                status: 503,
                url: url.to_string(),
                ..HttpResponse::default()
            })
        });

        let hunter = FeedHunter::new(client);
        let result = hunter.discover("https://example.com/", &DiscoveryOptions::default());

        assert!(result.has_error());
        assert_eq!(result.error.unwrap().kind, DiscoveryErrorKind::General);
        assert!(result.feeds.is_empty());
    }

    #[test]
    fn test_invalid_page_url_is_general() {
        let client = MockHttpClient::new();
        let hunter = FeedHunter::new(client);
        let page = Html::parse_document("<html></html>");

        let result = hunter.discover_in_page("not a url", &page, &DiscoveryOptions::default());
        assert_eq!(result.error.unwrap().kind, DiscoveryErrorKind::General);
    }

    #[test]
    fn test_page_title() {
        let page = FetchedPage {
            url: "https://example.com/".to_string(),
            html: Html::parse_document("<html><head><title> Example Site </title></head></html>"),
        };
        assert_eq!(page.title().as_deref(), Some("Example Site"));
    }
}
