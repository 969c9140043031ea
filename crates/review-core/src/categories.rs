//! Keyword-based food category detection.
//!
//! A review joins every category with at least one keyword contained in its
//! lower-cased text and items. Containment is plain substring search, so
//! "burger" matches "cheeseburger".
use std::collections::HashMap;

use crate::model::{CategoryRestaurant, CategoryStats, ParsedReview};
use crate::stats::{mean, round2};

pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Burgers", &["burger", "smash", "patty", "bun"]),
    (
        "Asian",
        &[
            "asian", "sushi", "ramen", "noodle", "rice", "thai", "chinese", "korean", "japanese",
        ],
    ),
    (
        "Desserts",
        &["dessert", "cake", "brownie", "ice cream", "chocolate", "sweet", "waffle"],
    ),
    (
        "Chicken",
        &["chicken", "wings", "tenders", "fried chicken", "nashville"],
    ),
    (
        "Drinks/Chai",
        &["chai", "tea", "coffee", "drink", "matcha", "smoothie", "milkshake"],
    ),
    ("Steaks", &["steak", "ribeye", "beef", "t-bone", "sirloin"]),
    (
        "Middle Eastern",
        &["shawarma", "kebab", "halal", "turkish", "lebanese", "pita"],
    ),
];

const STOP_WORDS: &[&str] = &["with", "that", "this", "from", "were", "have", "been"];
const TOP_N: usize = 5;

/// Keyword length in UTF-16 code units, so emoji tokens count as two per symbol.
fn keyword_len(word: &str) -> usize {
    word.encode_utf16().count()
}

#[derive(Default)]
struct CategoryAccumulator {
    ratings: Vec<f64>,
    restaurants: Vec<CategoryRestaurant>,
    words: Vec<(String, usize)>,
    word_index: HashMap<String, usize>,
}

impl CategoryAccumulator {
    fn add(&mut self, review: &ParsedReview, text: &str) {
        self.ratings.push(review.rating);

        // First visit wins; later visits never update the stored rating.
        if !self
            .restaurants
            .iter()
            .any(|r| r.name == review.restaurant_name)
        {
            self.restaurants.push(CategoryRestaurant {
                name: review.restaurant_name.clone(),
                handle: review.restaurant_handle.clone(),
                rating: review.rating,
            });
        }

        for word in text
            .split_whitespace()
            .filter(|w| keyword_len(w) > 3 && !STOP_WORDS.contains(w))
        {
            match self.word_index.get(word) {
                Some(&slot) => self.words[slot].1 += 1,
                None => {
                    self.word_index.insert(word.to_string(), self.words.len());
                    self.words.push((word.to_string(), 1));
                }
            }
        }
    }

    fn finish(mut self, category: &str) -> CategoryStats {
        self.restaurants
            .sort_by(|a, b| b.rating.total_cmp(&a.rating));
        self.restaurants.truncate(TOP_N);

        self.words.sort_by(|a, b| b.1.cmp(&a.1));

        CategoryStats {
            category: category.to_string(),
            count: self.ratings.len(),
            average_rating: round2(mean(&self.ratings)),
            top_restaurants: self.restaurants,
            top_keywords: self
                .words
                .into_iter()
                .take(TOP_N)
                .map(|(word, _)| word)
                .collect(),
        }
    }
}

/// Names of every category whose keywords occur in `text` (already lower-cased).
pub fn matching_categories(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    CATEGORY_KEYWORDS
        .iter()
        .filter(move |(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(category, _)| *category)
}

/// Per-category review counts, averages, top restaurants and keywords,
/// sorted by review count descending.
pub fn detect_categories(reviews: &[ParsedReview]) -> Vec<CategoryStats> {
    let mut order: Vec<&'static str> = Vec::new();
    let mut data: HashMap<&'static str, CategoryAccumulator> = HashMap::new();

    for review in reviews {
        let text = review.combined_text().to_lowercase();

        for category in matching_categories(&text) {
            let acc = data.entry(category).or_insert_with(|| {
                order.push(category);
                CategoryAccumulator::default()
            });
            acc.add(review, &text);
        }
    }

    let mut categories: Vec<CategoryStats> = order
        .into_iter()
        .filter_map(|category| data.remove(category).map(|acc| acc.finish(category)))
        .collect();

    categories.sort_by(|a, b| b.count.cmp(&a.count));
    categories
}
