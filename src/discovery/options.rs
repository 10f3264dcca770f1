use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Default,
    /// Never re-scan HTML pages found at well-known locations.
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    /// Only accept `<link rel="alternate">` elements with a feed/XML `type`.
    pub strict_header_links: bool,
    /// Probe conventional feed paths on the page's origin.
    pub search_wellknown_locations: bool,
    pub advanced_search_mode: SearchMode,
    /// Probe every anchor on the page. Expensive.
    pub parse_body_links: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            strict_header_links: true,
            search_wellknown_locations: true,
            advanced_search_mode: SearchMode::Default,
            parse_body_links: false,
        }
    }
}

impl DiscoveryOptions {
    /// Options for re-scanning an HTML page found at a well-known location:
    /// body links on, well-known probing off.
    pub fn nested(&self) -> Self {
        Self {
            parse_body_links: true,
            search_wellknown_locations: false,
            ..*self
        }
    }
}
