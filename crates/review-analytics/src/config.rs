use std::path::PathBuf;

use review_core::parser::DEFAULT_REVIEWER_HANDLE;
use review_core::words::DEFAULT_MIN_COUNT;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment is valid.
#[derive(Debug, Clone)]
pub struct Config {
    /// The reviewer's own handle, without `@`. Drives approval detection.
    pub reviewer_handle: String,
    /// Minimum occurrences for a word to be reported.
    pub min_word_count: usize,
    /// Fallback directory for `analyze_export`.
    pub export_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `REVIEWER_HANDLE`: handle whose "APPROVED" marks a review (default `diningwithtaha`)
    /// - `MIN_WORD_COUNT`: word-frequency threshold, at least 1 (default 2)
    /// - `EXPORT_DIR`: Instagram export directory used when a request names none
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("REVIEWER_HANDLE").ok(),
            std::env::var("MIN_WORD_COUNT").ok(),
            std::env::var("EXPORT_DIR").ok(),
        )
    }

    fn from_vars(
        reviewer_handle: Option<String>,
        min_word_count: Option<String>,
        export_dir: Option<String>,
    ) -> Result<Self, AppError> {
        let reviewer_handle = match reviewer_handle {
            Some(raw) => parse_handle(&raw)?,
            None => DEFAULT_REVIEWER_HANDLE.to_string(),
        };

        let min_word_count = match min_word_count {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "MIN_WORD_COUNT must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_MIN_COUNT,
        };

        let export_dir = export_dir
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            reviewer_handle,
            min_word_count,
            export_dir,
        })
    }
}

fn parse_handle(raw: &str) -> Result<String, AppError> {
    let handle = raw.trim().trim_start_matches('@');
    let valid = !handle.is_empty()
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');

    if valid {
        Ok(handle.to_string())
    } else {
        Err(AppError::Config(format!(
            "REVIEWER_HANDLE must be a social handle like '@name', got '{raw}'"
        )))
    }
}
