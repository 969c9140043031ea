/// Error types for the review core.
///
/// Parsing and statistics are total over their inputs and never fail. The only
/// fallible surface is reading an Instagram data export from disk; the server
/// crate wraps `CoreError` via `#[from]` in its own application error.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid export json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no posts.json or reels.json found in {}", .0.display())]
    EmptyExport(PathBuf),
}
