//! Reader for Instagram "download your information" exports.
//!
//! The export directory holds `posts.json` (an array of posts) and
//! `reels.json` (`{ "ig_reels_media": [...] }`). Only captioned media is kept;
//! the caption lives in `title`. Either file may be absent, and a file that
//! cannot be read or decoded is skipped with a warning.
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::Post;

pub const POSTS_FILE: &str = "posts.json";
pub const REELS_FILE: &str = "reels.json";

#[derive(Debug, Deserialize)]
struct ExportMedia {
    #[serde(default)]
    uri: String,
    creation_timestamp: i64,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportPost {
    #[serde(default)]
    media: Vec<ExportMedia>,
    #[serde(default)]
    title: String,
    creation_timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct ReelsFile {
    #[serde(default)]
    ig_reels_media: Vec<ReelWrapper>,
}

#[derive(Debug, Deserialize)]
struct ReelWrapper {
    #[serde(default)]
    media: Vec<ExportMedia>,
}

/// A captioned post recovered from an export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPost {
    /// Media file stem, or `post_<ts>` / `reel_<ts>` when there is no media URI.
    pub id: String,
    pub post: Post,
}

/// Load every captioned post and reel from `dir`, newest first.
pub fn load_export_dir(dir: &Path) -> Result<Vec<ExportedPost>, CoreError> {
    let posts_path = dir.join(POSTS_FILE);
    let reels_path = dir.join(REELS_FILE);

    if !posts_path.exists() && !reels_path.exists() {
        return Err(CoreError::EmptyExport(dir.to_path_buf()));
    }

    let mut exported = Vec::new();

    if let Some(posts) = read_export_file::<Vec<ExportPost>>(&posts_path) {
        info!(count = posts.len(), path = %posts_path.display(), "read export posts");
        exported.extend(posts.into_iter().filter_map(|post| {
            let uri = post.media.first().map(|m| m.uri.as_str());
            captioned(&post.title, uri, post.creation_timestamp, "post")
        }));
    }

    if let Some(reels) = read_export_file::<ReelsFile>(&reels_path) {
        info!(count = reels.ig_reels_media.len(), path = %reels_path.display(), "read export reels");
        exported.extend(reels.ig_reels_media.into_iter().filter_map(|reel| {
            let media = reel.media.into_iter().next()?;
            let title = media.title.unwrap_or_default();
            captioned(&title, Some(media.uri.as_str()), media.creation_timestamp, "reel")
        }));
    }

    // RFC 3339 strings with a fixed format sort chronologically.
    exported.sort_by(|a, b| b.post.timestamp.cmp(&a.post.timestamp));
    Ok(exported)
}

/// Convenience wrapper returning just the posts.
pub fn load_export_posts(dir: &Path) -> Result<Vec<Post>, CoreError> {
    Ok(load_export_dir(dir)?.into_iter().map(|e| e.post).collect())
}

/// Decode one export file; missing files are `None`, broken ones warn and are `None`.
fn read_export_file<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    match read_json(path) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable export file");
            None
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CoreError::Json {
        path: PathBuf::from(path),
        source,
    })
}

fn captioned(title: &str, uri: Option<&str>, timestamp: i64, kind: &str) -> Option<ExportedPost> {
    if title.trim().is_empty() {
        debug!(kind, timestamp, "export entry has no caption, skipping");
        return None;
    }

    let id = uri
        .and_then(media_id)
        .unwrap_or_else(|| format!("{kind}_{timestamp}"));

    Some(ExportedPost {
        id,
        post: Post::new(title, epoch_to_rfc3339(timestamp)),
    })
}

/// Last path segment of a media URI with a `.jpg`/`.mp4`/`.png` extension removed.
fn media_id(uri: &str) -> Option<String> {
    let name = uri.rsplit('/').next().filter(|s| !s.is_empty())?;
    let stem = [".jpg", ".mp4", ".png"]
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name);
    Some(stem.to_string())
}

/// Epoch seconds as `YYYY-MM-DDTHH:MM:SS.sssZ`. Out-of-range values map to "".
pub fn epoch_to_rfc3339(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_conversion() {
        assert_eq!(epoch_to_rfc3339(1734273000), "2024-12-15T14:30:00.000Z");
        assert_eq!(epoch_to_rfc3339(0), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_media_id() {
        assert_eq!(
            media_id("media/posts/202412/17912345.jpg").as_deref(),
            Some("17912345")
        );
        assert_eq!(media_id("media/reels/abc.webp").as_deref(), Some("abc.webp"));
        assert_eq!(media_id("media/"), None);
    }

    #[test]
    fn test_load_export_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(POSTS_FILE),
            r#"[
                {"media": [{"uri": "media/posts/1.jpg", "creation_timestamp": 1734273000}],
                 "title": "@bobabloom_ RG1 9.3/10", "creation_timestamp": 1734273000},
                {"media": [], "title": "   ", "creation_timestamp": 1734000000},
                {"media": [], "title": "@nandos 6.8/10", "creation_timestamp": 1732107600}
            ]"#,
        )
        .expect("write posts");
        std::fs::write(
            dir.path().join(REELS_FILE),
            r#"{"ig_reels_media": [
                {"media": [{"uri": "media/reels/9.mp4", "creation_timestamp": 1733500000, "title": "@wagamama OX1 7.2/10"}]},
                {"media": [{"uri": "media/reels/10.mp4", "creation_timestamp": 1733600000}]}
            ]}"#,
        )
        .expect("write reels");

        let exported = load_export_dir(dir.path()).expect("load export");
        let ids: Vec<&str> = exported.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "9", "post_1732107600"]);
        assert_eq!(exported[0].post.timestamp, "2024-12-15T14:30:00.000Z");
        assert_eq!(exported[1].post.caption, "@wagamama OX1 7.2/10");
    }

    #[test]
    fn test_reels_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(REELS_FILE),
            r#"{"ig_reels_media": [{"media": [{"uri": "r.mp4", "creation_timestamp": 1, "title": "8/10"}]}]}"#,
        )
        .expect("write reels");

        let posts = load_export_posts(dir.path()).expect("load export");
        assert_eq!(posts, vec![Post::new("8/10", "1970-01-01T00:00:01.000Z")]);
    }

    #[test]
    fn test_missing_export_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_export_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyExport(_)));
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(POSTS_FILE), "{not json").expect("write posts");
        let exported = load_export_dir(dir.path()).expect("malformed file is skipped");
        assert!(exported.is_empty());
    }

    #[test]
    fn test_malformed_posts_keeps_reels() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(POSTS_FILE), "{not json").expect("write posts");
        std::fs::write(
            dir.path().join(REELS_FILE),
            r#"{"ig_reels_media": [{"media": [{"uri": "media/reels/7.mp4", "creation_timestamp": 1734273000, "title": "@dishoom 8.7/10"}]}]}"#,
        )
        .expect("write reels");

        let posts = load_export_posts(dir.path()).expect("reels still load");
        assert_eq!(
            posts,
            vec![Post::new("@dishoom 8.7/10", "2024-12-15T14:30:00.000Z")]
        );
    }

    #[test]
    fn test_read_json_reports_decode_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(POSTS_FILE);
        std::fs::write(&path, "{not json").expect("write posts");
        let err = read_json::<Vec<ExportPost>>(&path).unwrap_err();
        assert!(matches!(err, CoreError::Json { .. }));
    }
}
