//! Full analytics pass over a review list.
//!
//! Every component is a pure function of the same slice; only the adjusted
//! scores depend on another component's output (the rating statistics).
use tracing::debug;

use crate::advanced::compute_advanced_stats;
use crate::model::{AnalyticsReport, ParsedReview, Post};
use crate::parser::{parse_posts, CaptionParser};
use crate::restaurants::compute_restaurant_stats;
use crate::stats::{compute_rating_stats, score_reviews};
use crate::words::analyze_word_frequency;

pub fn analyze(reviews: &[ParsedReview], min_word_count: usize) -> AnalyticsReport {
    let ratings = compute_rating_stats(reviews);
    let restaurants = compute_restaurant_stats(reviews);
    let words = analyze_word_frequency(reviews, min_word_count);
    let advanced = compute_advanced_stats(reviews);
    let scored = score_reviews(reviews, &ratings);

    debug!(
        reviews = reviews.len(),
        restaurants = restaurants.len(),
        words = words.len(),
        categories = advanced.categories.len(),
        "analysis complete"
    );

    AnalyticsReport {
        reviews: scored,
        ratings,
        restaurants,
        words,
        advanced,
    }
}

/// Parse `posts` and analyze the reviews among them.
///
/// Returns the report together with the number of posts that parsed as reviews.
pub fn analyze_posts(
    parser: &CaptionParser,
    posts: &[Post],
    min_word_count: usize,
) -> (AnalyticsReport, usize) {
    let reviews = parse_posts(parser, posts);
    (analyze(&reviews, min_word_count), reviews.len())
}
