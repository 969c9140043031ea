//! Rating statistics and z-score adjusted scores.
use std::collections::BTreeMap;

use crate::model::{ParsedReview, RatingBucket, RatingStats, ScoredReview};

/// Round to `places` decimals, halves away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub(crate) fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Average, median, mode, population standard deviation and a one-decimal
/// histogram of the review ratings.
///
/// Empty input yields the all-zero result. Mode ties go to the lowest rating.
pub fn compute_rating_stats(reviews: &[ParsedReview]) -> RatingStats {
    if reviews.is_empty() {
        return RatingStats::default();
    }

    let mut ratings: Vec<f64> = reviews.iter().map(|r| r.rating).collect();
    ratings.sort_by(f64::total_cmp);
    let n = ratings.len();

    let average = mean(&ratings);

    let median = if n % 2 == 0 {
        (ratings[n / 2 - 1] + ratings[n / 2]) / 2.0
    } else {
        ratings[n / 2]
    };

    // Keyed by tenths so equal one-decimal ratings share a bucket.
    let mut histogram: BTreeMap<i64, usize> = BTreeMap::new();
    for rating in &ratings {
        *histogram.entry((rating * 10.0).round() as i64).or_insert(0) += 1;
    }

    let mut mode_key = 0;
    let mut mode_count = 0;
    for (&key, &count) in &histogram {
        if count > mode_count {
            mode_key = key;
            mode_count = count;
        }
    }

    let variance = ratings
        .iter()
        .map(|r| (r - average).powi(2))
        .sum::<f64>()
        / n as f64;

    RatingStats {
        average: round2(average),
        median: round2(median),
        mode: mode_key as f64 / 10.0,
        std_dev: round2(variance.sqrt()),
        distribution: histogram
            .into_iter()
            .map(|(key, count)| RatingBucket {
                rating: key as f64 / 10.0,
                count,
            })
            .collect(),
        total_reviews: n,
    }
}

/// Re-centre a rating on 5 using the population z-score: `5 + 2z`, clamped
/// to [0, 10]. A population with no spread leaves the rating unchanged.
pub fn adjusted_score(rating: f64, stats: &RatingStats) -> f64 {
    if stats.std_dev == 0.0 {
        return rating;
    }

    let z = (rating - stats.average) / stats.std_dev;
    round2(5.0 + z * 2.0).clamp(0.0, 10.0)
}

/// Pair every review with its adjusted score against `stats`.
pub fn score_reviews(reviews: &[ParsedReview], stats: &RatingStats) -> Vec<ScoredReview> {
    reviews
        .iter()
        .map(|review| ScoredReview {
            adjusted_score: adjusted_score(review.rating, stats),
            review: review.clone(),
        })
        .collect()
}
