pub mod document;
pub mod frequency;
pub mod normalizer;
pub mod sanitizer;

pub use document::{AtomEntry, AtomFeed, Document, RssChannel, RssItem};
pub use frequency::analyze;
pub use normalizer::{BuildOptions, FeedNormalizer, FetchMetadata, NULL_ITEMS_ERROR};
pub use sanitizer::sanitize_basic;
