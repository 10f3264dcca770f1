//! Feed discovery for web pages and RSS/Atom normalization.
//!
//! - [`discovery::FeedHunter`] finds the feeds a page advertises, links to or
//!   publishes at conventional locations.
//! - [`services::FetchService`] fetches a feed and normalizes it into a
//!   [`domain::Feed`] of ordered [`domain::Post`]s with posting-cadence stats.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod http;
pub mod services;
pub mod urls;

pub use domain::{DiscoveryResult, Feed, Post, Website};
pub use errors::{FeedhoundError, FeedhoundResult};
