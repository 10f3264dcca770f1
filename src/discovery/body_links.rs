use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::discovery::anchor_title;
use crate::urls::resolve;

/// Upper bound on distinct anchors probed for one page.
pub const MAX_BODY_LINKS: usize = 150;

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: Url,
    pub title: String,
}

/// Distinct (href, title) anchors, capped at [`MAX_BODY_LINKS`], resolved
/// against the page. Untitled anchors dedupe by href alone. Non-HTTP targets
/// are dropped.
pub fn candidates(page_url: &Url, page: &Html) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut untitled = 0;
    let mut distinct = Vec::new();

    for anchor in page.select(&ANCHORS) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let title = anchor_title(&anchor);
        if !seen.insert((href.to_string(), title.clone())) {
            continue;
        }

        let title = title.unwrap_or_else(|| {
            let placeholder = format!("Body Link {}", untitled);
            untitled += 1;
            placeholder
        });
        distinct.push((href, title));
        if distinct.len() == MAX_BODY_LINKS {
            break;
        }
    }

    distinct
        .into_iter()
        .filter_map(|(href, title)| match resolve(page_url, href) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(Candidate { url, title }),
            Ok(_) => None,
            Err(e) => {
                debug!(href, error = %e, "skipping unresolvable body link");
                None
            }
        })
        .collect()
}
