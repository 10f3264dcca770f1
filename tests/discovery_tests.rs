mod common;

use common::FakeWeb;
use feedhound::discovery::{DiscoveryOptions, FeedHunter, SearchMode};
use feedhound::domain::DiscoveryErrorKind;
use feedhound::services::SiteService;

const ORIGIN: &str = "https://www.site.test/";

fn origin_page() -> String {
    r#"<!DOCTYPE html>
<html>
  <head>
    <title>Site Test</title>
    <link rel="alternate" type="application/rss+xml" title="Main Feed" href="/feed/">
    <link rel="alternate" type="application/atom+xml" href="/comments.atom">
  </head>
  <body>
    <a href="http://feeds.feedburner.com/SiteTest" title="Site via FeedBurner">Subscribe</a>
    <a href="http://feeds.feedblitz.com/sitetest?src=home">Email updates</a>
    <a href="/about">About</a>
  </body>
</html>"#
        .to_string()
}

fn blog_page() -> &'static str {
    r#"<html><body>
        <a href="https://www.site.test/">Back home</a>
        <a href="/blog/index.xml">Blog posts</a>
    </body></html>"#
}

fn site() -> FakeWeb {
    FakeWeb::new()
        .html(ORIGIN, &origin_page())
        .feed("https://www.site.test/feed/", b"<rss/>")
        .html("https://www.site.test/blog", blog_page())
        .feed("https://www.site.test/blog/index.xml", b"<rss/>")
}

#[test]
fn test_full_discovery_merges_all_sources() {
    let web = site();
    let hunter = FeedHunter::new(&web);

    let result = hunter.discover(ORIGIN, &DiscoveryOptions::default());

    assert!(!result.has_error(), "{:?}", result.error);
    assert_eq!(result.title_for("site.test/feed"), Some("Main Feed"));
    assert_eq!(result.title_for("site.test/comments.atom"), Some("Unknown (0)"));
    assert_eq!(
        result.title_for("feeds.feedburner.com/SiteTest"),
        Some("Site via FeedBurner")
    );
    assert_eq!(
        result.get("feeds.feedblitz.com/sitetest?x=1").map(|f| f.url.as_str()),
        Some("http://feeds.feedblitz.com/sitetest?x=1")
    );
    assert_eq!(result.title_for("site.test/blog/index.xml"), Some("Blog posts"));
    assert_eq!(result.len(), 5);
}

#[test]
fn test_wellknown_rescan_happens_once() {
    let web = site();
    let hunter = FeedHunter::new(&web);

    hunter.discover(ORIGIN, &DiscoveryOptions::default());

    // The origin is fetched once for the initial scan; the blog page links
    // back to it but the nested scan only probes it.
    assert_eq!(web.get_count(ORIGIN), 1);
    assert_eq!(web.get_count("https://www.site.test/blog"), 1);
    assert_eq!(web.total_gets(), 2);
    assert_eq!(web.head_count(ORIGIN), 1);
}

#[test]
fn test_simple_mode_fetches_only_origin() {
    let web = site();
    let hunter = FeedHunter::new(&web);
    let options = DiscoveryOptions {
        advanced_search_mode: SearchMode::Simple,
        ..DiscoveryOptions::default()
    };

    let result = hunter.discover(ORIGIN, &options);

    assert_eq!(web.total_gets(), 1);
    assert!(result.get("site.test/blog/index.xml").is_none());
    assert!(result.get("site.test/feed").is_some());
}

#[test]
fn test_redirected_wellknown_feed() {
    let web = FakeWeb::new()
        .html("https://plain.test/", "<html><body>hi</body></html>")
        .redirect("https://plain.test/rss", "https://plain.test/rss.xml")
        .feed("https://plain.test/rss.xml", b"<rss/>");
    let hunter = FeedHunter::new(&web);

    let result = hunter.discover("https://plain.test/", &DiscoveryOptions::default());

    // The probe follows the redirect, but the candidate URL is what gets recorded.
    assert_eq!(result.len(), 1);
    assert!(result.get("plain.test/rss").is_some());
}

#[test]
fn test_missing_page_is_general_error() {
    let web = FakeWeb::new();
    let hunter = FeedHunter::new(&web);

    let result = hunter.discover("https://gone.test/", &DiscoveryOptions::default());

    assert_eq!(result.error.unwrap().kind, DiscoveryErrorKind::General);
    assert!(result.feeds.is_empty());
}

#[test]
fn test_site_summary() {
    let web = site();
    let service = SiteService::new(&web);

    let website = service.inspect(ORIGIN, &DiscoveryOptions::default());

    assert!(website.is_ok());
    assert_eq!(website.title.as_deref(), Some("Site Test"));
    assert!(website
        .feeds
        .iter()
        .any(|f| f.name == "Main Feed" && f.url == "https://www.site.test/feed/"));
}
