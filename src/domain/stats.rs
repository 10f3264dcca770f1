use serde::{Deserialize, Serialize};

pub const NO_ITEMS_LABEL: &str = "No Items To Count";
pub const NOT_SERIAL_LABEL: &str = "Not a Serial RSS feed";
pub const SAME_DATES_LABEL: &str = "All Feed Items Share Same PubDate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyPeriod {
    Hour,
    Day,
}

impl FrequencyPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyPeriod::Hour => "hour",
            FrequencyPeriod::Day => "day",
        }
    }
}

impl std::fmt::Display for FrequencyPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyType {
    Standard,
    /// Undated entries, e.g. a "top stories" list.
    Top,
    SameDates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFrequencyStats {
    pub posts: f64,
    pub period: FrequencyPeriod,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FrequencyType,
    pub size: u64,
}

impl Default for PostFrequencyStats {
    fn default() -> Self {
        Self {
            posts: 0.0,
            period: FrequencyPeriod::Day,
            label: NO_ITEMS_LABEL.to_string(),
            kind: FrequencyType::Standard,
            size: 0,
        }
    }
}
