pub mod discovery;
pub mod feed;
pub mod post;
pub mod stats;
pub mod website;

pub use discovery::{DiscoveredFeed, DiscoveryErrorKind, DiscoveryFailure, DiscoveryResult};
pub use feed::{Feed, FeedType, WriteStatus};
pub use post::Post;
pub use stats::{FrequencyPeriod, FrequencyType, PostFrequencyStats};
pub use website::{Website, WebsiteFeed};
