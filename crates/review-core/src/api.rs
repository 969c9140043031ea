use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{AnalyticsReport, ParsedReview, Post};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ParseCaptionParams {
    /// Raw caption text of one post.
    pub caption: String,
    /// ISO-8601 timestamp of the post, passed through unchanged.
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzePostsParams {
    /// Posts to analyze; captions without an "N/10" rating are ignored.
    pub posts: Vec<Post>,
    /// Minimum occurrences for a word to appear in the word list (default from server config).
    pub min_word_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeExportParams {
    /// Directory containing posts.json and/or reels.json from an Instagram data export.
    /// Defaults to the server's EXPORT_DIR.
    pub directory: Option<String>,
    pub min_word_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParseCaptionResponse {
    /// `null` when the caption is not a review.
    pub review: Option<ParsedReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub posts_received: usize,
    pub reviews_parsed: usize,
    #[serde(flatten)]
    pub report: AnalyticsReport,
}
