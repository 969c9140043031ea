/// MCP server exposing the review parser and analytics engine.
///
/// Exposes three tools:
/// - `parse_caption`: Interpret a single caption as a review
/// - `analyze_posts`: Parse a batch of posts and compute the full analytics report
/// - `analyze_export`: Same as `analyze_posts`, reading an Instagram data export
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use review_core::analysis::analyze_posts;
use review_core::api::{
    AnalyzeExportParams, AnalyzePostsParams, AnalyzeResponse, ParseCaptionParams,
    ParseCaptionResponse,
};
use review_core::export::load_export_posts;
use review_core::model::Post;
use review_core::parser::CaptionParser;

use crate::config::Config;
use crate::error::AppError;

#[derive(Clone)]
pub struct ReviewAnalyticsServer {
    parser: Arc<CaptionParser>,
    config: Arc<Config>,
    tool_router: ToolRouter<ReviewAnalyticsServer>,
}

impl ReviewAnalyticsServer {
    pub fn new(config: Config) -> Self {
        Self {
            parser: Arc::new(CaptionParser::new(&config.reviewer_handle)),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    fn min_word_count(&self, requested: Option<u32>) -> usize {
        requested
            .map(|n| (n as usize).max(1))
            .unwrap_or(self.config.min_word_count)
    }

    fn export_dir(&self, requested: Option<String>) -> Result<PathBuf, String> {
        requested
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.config.export_dir.clone())
            .ok_or_else(|| "directory is required (no EXPORT_DIR configured)".to_string())
    }
}

/// Parse and analyze a batch, rejecting batches that contain no review.
fn run_analysis(
    parser: &CaptionParser,
    posts: &[Post],
    min_word_count: usize,
) -> Result<AnalyzeResponse, String> {
    let (report, reviews_parsed) = analyze_posts(parser, posts, min_word_count);
    if reviews_parsed == 0 {
        return Err("no valid reviews found in the posts".to_string());
    }

    info!(
        posts = posts.len(),
        reviews = reviews_parsed,
        restaurants = report.restaurants.len(),
        "analysis served"
    );

    Ok(AnalyzeResponse {
        posts_received: posts.len(),
        reviews_parsed,
        report,
    })
}

fn load_export(dir: &std::path::Path) -> Result<Vec<Post>, AppError> {
    Ok(load_export_posts(dir)?)
}

#[tool_router]
impl ReviewAnalyticsServer {
    #[tool(description = "Parse one social-media caption into a structured restaurant review (name, handle, rating out of 10, location, dishes, approval). Returns null when the caption has no 'N/10' rating.")]
    async fn parse_caption(
        &self,
        Parameters(params): Parameters<ParseCaptionParams>,
    ) -> Result<Json<ParseCaptionResponse>, String> {
        let timestamp = params.timestamp.unwrap_or_default();
        let review = self.parser.parse(&params.caption, &timestamp);
        Ok(Json(ParseCaptionResponse { review }))
    }

    #[tool(description = "Analyze a batch of posts ({caption, timestamp}). Returns parsed reviews with adjusted scores, rating statistics, ranked restaurants, sentiment-tagged word frequencies, a monthly timeline and food category breakdown.")]
    async fn analyze_posts(
        &self,
        Parameters(params): Parameters<AnalyzePostsParams>,
    ) -> Result<Json<AnalyzeResponse>, String> {
        if params.posts.is_empty() {
            return Err("posts array is required".to_string());
        }

        let min_word_count = self.min_word_count(params.min_word_count);
        run_analysis(&self.parser, &params.posts, min_word_count).map(Json)
    }

    #[tool(description = "Analyze an Instagram data export directory containing posts.json and/or reels.json. Defaults to the configured EXPORT_DIR.")]
    async fn analyze_export(
        &self,
        Parameters(params): Parameters<AnalyzeExportParams>,
    ) -> Result<Json<AnalyzeResponse>, String> {
        let dir = self.export_dir(params.directory)?;
        let min_word_count = self.min_word_count(params.min_word_count);
        let parser = Arc::clone(&self.parser);

        info!(directory = %dir.display(), "analyze_export tool invoked");

        tokio::task::spawn_blocking(move || {
            let posts = load_export(&dir).map_err(|e| format!("export load failed: {e}"))?;
            run_analysis(&parser, &posts, min_word_count)
        })
        .await
        .map_err(|e| format!("analysis task failed: {e}"))?
        .map(Json)
    }
}

#[tool_handler]
impl ServerHandler for ReviewAnalyticsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "review-analytics".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Restaurant review analytics for captions by @{}. Use parse_caption to \
                 inspect a single caption, analyze_posts to compute statistics over a \
                 batch of {{caption, timestamp}} posts, and analyze_export to analyze an \
                 Instagram data export directory.",
                self.parser.reviewer_handle()
            )),
        }
    }
}
