//! Per-restaurant aggregation and ranking.
use std::collections::HashMap;

use crate::model::{ParsedReview, RestaurantStats};
use crate::stats::{mean, round2};

struct Accumulator {
    name: String,
    handle: Option<String>,
    ratings: Vec<f64>,
    locations: Vec<String>,
}

/// Group reviews by restaurant and rank the groups by average rating.
///
/// Identity is the handle when one was tagged, otherwise the parsed name.
/// Groups keep first-seen order, so equal averages rank in input order.
pub fn compute_restaurant_stats(reviews: &[ParsedReview]) -> Vec<RestaurantStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for review in reviews {
        let key = review
            .restaurant_handle
            .as_deref()
            .unwrap_or(&review.restaurant_name);

        let slot = *index.entry(key).or_insert_with(|| {
            let name = match &review.restaurant_handle {
                Some(handle) => format!("@{handle}"),
                None => review.restaurant_name.clone(),
            };
            groups.push(Accumulator {
                name,
                handle: review.restaurant_handle.clone(),
                ratings: Vec::new(),
                locations: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.ratings.push(review.rating);
        if let Some(location) = &review.location {
            if !group.locations.contains(location) {
                group.locations.push(location.clone());
            }
        }
    }

    let mut stats: Vec<RestaurantStats> = groups
        .into_iter()
        .map(|group| {
            let avg = mean(&group.ratings);
            RestaurantStats {
                name: group.name,
                handle: group.handle,
                visit_count: group.ratings.len(),
                ratings: group.ratings,
                average_rating: round2(avg),
                weighted_average: round2(avg / 2.0),
                locations: group.locations,
                rank: 0,
            }
        })
        .collect();

    // Stable: ties keep grouping order.
    stats.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));

    for (position, restaurant) in stats.iter_mut().enumerate() {
        restaurant.rank = position + 1;
    }

    stats
}
