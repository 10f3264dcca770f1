use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::discovery::{insert_feed, SourceMap};
use crate::http::probe::FEED_CONTENT_TYPE;
use crate::urls::resolve;

static ALTERNATE_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("link[rel~='alternate'][href]").expect("alternate link selector is valid")
});

/// Collect `<link rel="alternate">` feeds. With `strict`, only links whose
/// `type` is a feed/XML content type count.
pub fn find(page_url: &Url, page: &Html, strict: bool) -> SourceMap {
    let mut found = SourceMap::new();
    let mut untitled = 0;

    for link in page.select(&ALTERNATE_LINKS) {
        let declared_type = link.value().attr("type").unwrap_or("");
        if strict && !FEED_CONTENT_TYPE.is_match(declared_type) {
            continue;
        }

        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let url = match resolve(page_url, href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "skipping unresolvable header link");
                continue;
            }
        };

        let title = match link.value().attr("title").map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => {
                let placeholder = format!("Unknown ({})", untitled);
                untitled += 1;
                placeholder
            }
        };

        insert_feed(&mut found, url, title);
    }

    found
}
