use url::Url;

/// Paths where sites conventionally publish a feed or a feed index.
pub const WELLKNOWN_PATHS: &[&str] = &["/feed/", "/feeds", "/rss", "/rssfeeds", "/blog"];

/// Candidate URLs on the page's origin, plus the `feeds.` host alias.
pub fn candidates(page_url: &Url) -> Vec<Url> {
    let mut urls: Vec<Url> = WELLKNOWN_PATHS
        .iter()
        .filter_map(|path| page_url.join(path).ok())
        .collect();

    if let Some(alias) = feeds_alias(page_url) {
        urls.push(alias);
    }

    urls
}

fn feeds_alias(page_url: &Url) -> Option<Url> {
    let host = page_url.host_str()?;
    let bare = host.strip_prefix("www.").unwrap_or(host);
    if bare.starts_with("feeds.") {
        return None;
    }

    let mut alias = page_url.clone();
    alias.set_host(Some(&format!("feeds.{}", bare))).ok()?;
    alias.set_path("/");
    alias.set_query(None);
    alias.set_fragment(None);
    Some(alias)
}
