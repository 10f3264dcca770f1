use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::discovery::{DiscoveryOptions, SearchMode};
use crate::services::FetchOptions;

#[derive(Parser)]
#[command(name = "feedhound")]
#[command(about = "Discover feeds on a web page and normalize RSS/Atom documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the feeds published by a web page
    Discover(DiscoverArgs),

    /// Fetch a feed from a URL or local file and print it normalized
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Page URL to scan
    pub url: String,

    /// Accept every <link rel="alternate">, not only feed types
    #[arg(long)]
    pub loose: bool,

    /// Do not probe conventional feed locations like /feed/ and /rss
    #[arg(long)]
    pub no_wellknown: bool,

    /// Do not re-scan HTML pages found at conventional locations
    #[arg(long)]
    pub simple: bool,

    /// Probe every link on the page (slow)
    #[arg(long)]
    pub body_links: bool,

    /// Print a site summary (page title and feed list) instead of the raw result
    #[arg(long)]
    pub site: bool,
}

impl DiscoverArgs {
    pub fn options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            strict_header_links: !self.loose,
            search_wellknown_locations: !self.no_wellknown,
            advanced_search_mode: if self.simple {
                SearchMode::Simple
            } else {
                SearchMode::Default
            },
            parse_body_links: self.body_links,
        }
    }
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Feed URL (http:, https:, feed:) or local file path
    pub location: String,

    /// Include sanitized entry content
    #[arg(long)]
    pub content: bool,

    /// Extract canonical links from entry content
    #[arg(long)]
    pub links: bool,

    /// Keep entries in document order
    #[arg(long)]
    pub keep_order: bool,

    /// Also write the raw feed bytes to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl FetchArgs {
    pub fn options(&self) -> FetchOptions {
        FetchOptions {
            include_content: self.content,
            parse_links: self.links,
            keep_source_order: self.keep_order,
            output_file: self.output.clone(),
        }
    }
}
