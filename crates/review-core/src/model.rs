use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One social post as handed over by the retrieval side: raw caption text and
/// the post's ISO-8601 timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Post {
    pub caption: String,
    /// Missing timestamps deserialize as an empty string.
    #[serde(default)]
    pub timestamp: String,
}

impl Post {
    pub fn new(caption: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A caption interpreted as a restaurant review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReview {
    /// Display name: the handle, a cleaned first line, or "Unknown Restaurant".
    pub restaurant_name: String,
    /// First `@mention` in the caption, without the `@`.
    pub restaurant_handle: Option<String>,
    /// Score out of 10, always within [0, 10].
    pub rating: f64,
    /// Postcode district (e.g. "RG1") or a city name.
    pub location: Option<String>,
    /// Caption with handles, rating, postcode, approval marker and items removed.
    pub review_text: String,
    /// "dish: description" pairs in encounter order.
    pub items: Vec<String>,
    pub timestamp: String,
    pub is_approved: bool,
    pub raw_caption: String,
}

impl ParsedReview {
    /// Review text followed by the joined items, the corpus that word and
    /// category analysis tokenize.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.review_text, self.items.join(" "))
    }
}

/// One histogram bucket: a rating rounded to one decimal and its frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RatingBucket {
    pub rating: f64,
    pub count: usize,
}

/// Descriptive statistics over a batch of ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    pub average: f64,
    pub median: f64,
    pub mode: f64,
    pub std_dev: f64,
    /// Buckets in ascending rating order, serialized as a list of
    /// `{"rating": 9.3, "count": 1}` objects rather than a rating-keyed map.
    pub distribution: Vec<RatingBucket>,
    pub total_reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantStats {
    /// `@handle` when the restaurant was tagged, otherwise the parsed name.
    pub name: String,
    pub handle: Option<String>,
    pub ratings: Vec<f64>,
    pub average_rating: f64,
    /// Average on a 0-5 scale.
    pub weighted_average: f64,
    pub visit_count: usize,
    pub locations: Vec<String>,
    /// 1 = best.
    pub rank: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
    pub sentiment: Sentiment,
}

/// Posting activity for one calendar month ("YYYY-MM").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub month: String,
    pub count: usize,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryRestaurant {
    pub name: String,
    pub handle: Option<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    pub average_rating: f64,
    pub top_restaurants: Vec<CategoryRestaurant>,
    pub top_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedStats {
    pub timeline: Vec<TimelineEntry>,
    pub categories: Vec<CategoryStats>,
    /// Integer percentage, 0-100.
    pub approval_rate: u32,
    pub average_review_length: usize,
    pub total_approved: usize,
    pub total_reviews: usize,
}

/// A review annotated with its z-score adjusted rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: ParsedReview,
    pub adjusted_score: f64,
}

/// Everything the dashboard needs, computed from one review list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyticsReport {
    pub reviews: Vec<ScoredReview>,
    pub ratings: RatingStats,
    pub restaurants: Vec<RestaurantStats>,
    pub words: Vec<WordFrequency>,
    pub advanced: AdvancedStats,
}
