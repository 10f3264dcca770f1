//! URL helpers shared by discovery and normalization.
//!
//! [`canonicalize`] produces the dedup key for a URL: scheme dropped, host
//! lower-cased without a leading `www.`, trailing `/` removed when no query
//! follows, and `utm_*` tracking parameters removed.

use url::Url;

use crate::errors::FeedhoundResult;

pub fn canonicalize(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let query = parsed.query().map(strip_utm).filter(|q| !q.is_empty());

    let path = parsed.path();
    let path = match query {
        Some(_) => path,
        None => path.strip_suffix('/').unwrap_or(path),
    };

    let mut key = String::with_capacity(host.len() + path.len() + 16);
    key.push_str(host);
    key.push_str(path);
    if let Some(query) = query {
        key.push('?');
        key.push_str(&query);
    }
    Some(key)
}

fn strip_utm(query: &str) -> String {
    query
        .split('&')
        .filter(|param| !param.starts_with("utm_"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Resolve `href` against `base`, rewriting a `feed://` scheme to the base's scheme.
pub fn resolve(base: &Url, href: &str) -> FeedhoundResult<Url> {
    let href = href.trim();
    let rewritten;
    let href = match href.strip_prefix("feed://") {
        Some(rest) => {
            rewritten = format!("{}://{}", base.scheme(), rest);
            rewritten.as_str()
        }
        None => href,
    };
    Ok(base.join(href)?)
}

/// Turn a `feed:` location into something an HTTP client can fetch.
pub fn feed_scheme_to_http(location: &str) -> String {
    if let Some(rest) = location.strip_prefix("feed://") {
        format!("http://{}", rest)
    } else if let Some(rest) = location.strip_prefix("feed:") {
        rest.to_string()
    } else {
        location.to_string()
    }
}

/// Locations with one of these prefixes are fetched over HTTP; anything else is a path.
pub fn is_remote(location: &str) -> bool {
    ["http:", "https:", "feed:"]
        .iter()
        .any(|prefix| location.starts_with(prefix))
}
