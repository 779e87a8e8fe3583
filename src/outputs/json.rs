//! JSON output generation for the API.
//!
//! This module serializes an [`Edition`] to pretty-printed JSON for
//! consumption by external clients.
//!
//! # Output Structure
//!
//! Files are organized by date with edition names:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```
//!
//! A later run in the same edition slot overwrites the earlier file.

use crate::models::Edition;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the JSON file for `edition` under `json_output_dir`.
///
/// `{json_output_dir}/{local_date}/{time_of_day}.json`
pub fn edition_json_path(edition: &Edition, json_output_dir: &str) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(&edition.local_date)
        .join(format!("{}.json", edition.time_of_day))
}

/// Write an [`Edition`] to a JSON file with date-based directory structure.
///
/// Creates the date directory when missing and returns the path written.
///
/// # Errors
///
/// Returns an error if serialization, directory creation, or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, date = %edition.local_date, edition = %edition.time_of_day))]
pub async fn write_edition(
    edition: &Edition,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(edition)?;
    let path = edition_json_path(edition, json_output_dir);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    info!(path = %path.display(), bytes = json.len(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON API file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisOutput, RunStats};

    fn edition() -> Edition {
        Edition {
            local_date: "2025-05-06".to_string(),
            time_of_day: "morning".to_string(),
            local_time: "07:15:00".to_string(),
            category: "world".to_string(),
            output: AnalysisOutput {
                reports: vec![],
                stats: RunStats {
                    distinct_sources: 2,
                    article_count: 5,
                    claim_count: 9,
                },
            },
        }
    }

    #[test]
    fn test_edition_json_path() {
        let path = edition_json_path(&edition(), "/srv/api");
        assert_eq!(path, PathBuf::from("/srv/api/2025-05-06/morning.json"));
    }

    #[tokio::test]
    async fn test_write_edition_round_trips() {
        let dir = std::env::temp_dir().join("awful_fact_check_json_test");
        let _ = std::fs::remove_dir_all(&dir);
        let dir_str = dir.to_string_lossy().to_string();

        let path = write_edition(&edition(), &dir_str).await.unwrap();
        assert!(path.ends_with("2025-05-06/morning.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let back: Edition = serde_json::from_str(&text).unwrap();
        assert_eq!(back.category, "world");
        assert_eq!(back.output.stats.claim_count, 9);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
