mod config;
mod error;
mod server;

use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use server::ReviewAnalyticsServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting review-analytics MCP server");

    let config = Config::from_env()?;
    info!(
        reviewer = %config.reviewer_handle,
        min_word_count = config.min_word_count,
        export_dir = ?config.export_dir,
        "configuration loaded"
    );

    let server = ReviewAnalyticsServer::new(config);

    info!("MCP server ready, serving on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!(error = %e, "MCP server error");
    })?;

    service.waiting().await?;
    info!("MCP server shut down");
    Ok(())
}
