//! Posting cadence from the dates of an already ordered list of posts.

use chrono::{DateTime, Utc};

use crate::domain::stats::{NOT_SERIAL_LABEL, SAME_DATES_LABEL};
use crate::domain::{FrequencyPeriod, FrequencyType, Post, PostFrequencyStats};

const SECONDS_IN_HOUR: f64 = 60.0 * 60.0;
const SECONDS_IN_DAY: f64 = 24.0 * SECONDS_IN_HOUR;

/// `posts[0]` is taken as the newest item and the last one as the oldest.
pub fn analyze(posts: &[Post]) -> PostFrequencyStats {
    let stats = PostFrequencyStats::default();

    let (newest, oldest) = match (posts.first(), posts.last()) {
        (Some(newest), Some(oldest)) => (newest, oldest),
        _ => return stats,
    };

    let newest_date = match newest.published_date {
        Some(date) => date,
        None => return not_serial(stats),
    };

    if oldest.published_date == Some(newest_date) {
        return PostFrequencyStats {
            label: SAME_DATES_LABEL.to_string(),
            kind: FrequencyType::SameDates,
            ..stats
        };
    }

    let span_secs = match span_seconds(newest_date, posts) {
        Some(span) if span > 0.0 => span,
        _ => return not_serial(stats),
    };

    let count = posts.len() as f64;
    let (rate, period) = if span_secs < SECONDS_IN_DAY {
        (count / (span_secs / SECONDS_IN_HOUR), FrequencyPeriod::Hour)
    } else {
        (count / (span_secs / SECONDS_IN_DAY), FrequencyPeriod::Day)
    };

    PostFrequencyStats {
        posts: rate,
        period,
        label: format!("{:.2} per {}", rate, period),
        ..stats
    }
}

/// Span between the newest date and the oldest one, falling back to the
/// second-oldest post when the oldest is undated.
fn span_seconds(newest: DateTime<Utc>, posts: &[Post]) -> Option<f64> {
    let oldest = posts
        .iter()
        .rev()
        .take(2)
        .find_map(|post| post.published_date)?;
    Some((newest - oldest).num_milliseconds() as f64 / 1000.0)
}

fn not_serial(stats: PostFrequencyStats) -> PostFrequencyStats {
    PostFrequencyStats {
        label: NOT_SERIAL_LABEL.to_string(),
        kind: FrequencyType::Top,
        ..stats
    }
}
