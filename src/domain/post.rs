use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub url: Option<String>,
    pub title: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub content: Option<String>,
    pub links: Vec<String>,
    pub comments_url: Option<String>,
    /// Best-effort identity used to spot the same entry across fetches.
    /// Not guaranteed to be unique.
    pub canonical_id: Option<String>,
    pub error: Option<String>,
}

impl Post {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
