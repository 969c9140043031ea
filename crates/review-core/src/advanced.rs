//! Posting timeline, category breakdown and approval/length summaries.
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::categories::detect_categories;
use crate::model::{AdvancedStats, ParsedReview, TimelineEntry};
use crate::stats::round2;

/// Parse a post timestamp as UTC.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) or a
/// bare date. Anything else, including an empty string, is `None`.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `"YYYY-MM"` bucket for a timestamp, if it can be parsed.
pub fn month_key(timestamp: &str) -> Option<String> {
    parse_timestamp(timestamp).map(|dt| dt.format("%Y-%m").to_string())
}

/// Review count and average rating per month, oldest month first.
/// Reviews with unparseable timestamps are left out.
pub fn posting_timeline(reviews: &[ParsedReview]) -> Vec<TimelineEntry> {
    let mut months: BTreeMap<String, (usize, f64)> = BTreeMap::new();

    for review in reviews {
        let Some(month) = month_key(&review.timestamp) else {
            debug!(timestamp = %review.timestamp, "unparseable timestamp, not on timeline");
            continue;
        };
        let entry = months.entry(month).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += review.rating;
    }

    months
        .into_iter()
        .map(|(month, (count, total))| TimelineEntry {
            month,
            count,
            average_rating: round2(total / count as f64),
        })
        .collect()
}

pub fn compute_advanced_stats(reviews: &[ParsedReview]) -> AdvancedStats {
    let total = reviews.len();
    let approved = reviews.iter().filter(|r| r.is_approved).count();
    let total_length: usize = reviews.iter().map(|r| r.review_text.chars().count()).sum();

    let (approval_rate, average_review_length) = if total == 0 {
        (0, 0)
    } else {
        (
            (approved as f64 / total as f64 * 100.0).round() as u32,
            (total_length as f64 / total as f64).round() as usize,
        )
    };

    AdvancedStats {
        timeline: posting_timeline(reviews),
        categories: detect_categories(reviews),
        approval_rate,
        average_review_length,
        total_approved: approved,
        total_reviews: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::tests::review;

    fn dated(rating: f64, timestamp: &str, approved: bool, text: &str) -> ParsedReview {
        let mut r = review("r", None, rating);
        r.timestamp = timestamp.to_string();
        r.is_approved = approved;
        r.review_text = text.to_string();
        r
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(month_key("2024-12-15T14:30:00Z").as_deref(), Some("2024-12"));
        assert_eq!(month_key("2024-12-15T14:30:00.000Z").as_deref(), Some("2024-12"));
        assert_eq!(
            month_key("2024-12-31T23:30:00-02:00").as_deref(),
            Some("2025-01")
        );
        assert_eq!(month_key("2024-03-01T08:00:00").as_deref(), Some("2024-03"));
        assert_eq!(month_key("2024-03-01").as_deref(), Some("2024-03"));
        assert_eq!(month_key(""), None);
        assert_eq!(month_key("yesterday"), None);
    }

    #[test]
    fn test_timeline_is_chronological() {
        let reviews = vec![
            dated(8.0, "2024-12-15T14:30:00Z", false, ""),
            dated(6.0, "2024-11-20T13:00:00Z", false, ""),
            dated(9.0, "2024-12-01T10:00:00Z", false, ""),
            dated(5.0, "", false, ""),
        ];
        let timeline = posting_timeline(&reviews);
        assert_eq!(
            timeline,
            vec![
                TimelineEntry {
                    month: "2024-11".to_string(),
                    count: 1,
                    average_rating: 6.0,
                },
                TimelineEntry {
                    month: "2024-12".to_string(),
                    count: 2,
                    average_rating: 8.5,
                },
            ]
        );
    }

    #[test]
    fn test_approval_and_length() {
        let reviews = vec![
            dated(8.0, "2024-12-15T14:30:00Z", true, "abcd"),
            dated(6.0, "2024-12-15T14:30:00Z", false, "abcdefg"),
            dated(9.0, "2024-12-15T14:30:00Z", false, "ab"),
        ];
        let stats = compute_advanced_stats(&reviews);
        assert_eq!(stats.approval_rate, 33);
        assert_eq!(stats.total_approved, 1);
        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.average_review_length, 4);
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_advanced_stats(&[]);
        assert_eq!(stats, AdvancedStats::default());
    }
}
