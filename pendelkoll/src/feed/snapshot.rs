//! File-backed announcement source.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::RawAnnouncement;

use super::convert::parse_response;
use super::error::FeedError;

/// Reads the most recent feed payload dumped to disk.
///
/// The file is re-read on every call so an external fetcher can replace
/// it between refreshes.
#[derive(Debug, Clone)]
pub struct SnapshotFeed {
    path: PathBuf,
}

impl SnapshotFeed {
    /// Create a feed reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and convert the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read, is not valid JSON, or
    /// carries a feed-level error.
    pub async fn load(&self) -> Result<Vec<RawAnnouncement>, FeedError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FeedError::Io {
                path: self.path.clone(),
                source,
            })?;

        let records = parse_response(&body)?;
        debug!(path = %self.path.display(), records = records.len(), "loaded snapshot");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAYLOAD: &str = r#"{"RESPONSE": {"RESULT": [{"TrainAnnouncement": [
        {"AdvertisedTrainIdent": "1043", "LocationSignature": "Lo",
         "AdvertisedTimeAtLocation": "2024-03-15T08:00:00.000+01:00", "ActivityType": "Avgang"},
        {"AdvertisedTrainIdent": "1043", "LocationSignature": "Em",
         "AdvertisedTimeAtLocation": "2024-03-15T08:30:00.000+01:00", "ActivityType": "Ankomst"}
    ]}]}}"#;

    #[tokio::test]
    async fn loads_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();

        let feed = SnapshotFeed::new(file.path());
        let records = feed.load().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(feed.path(), file.path());
    }

    #[tokio::test]
    async fn rereads_on_every_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("announcements.json");
        std::fs::write(&path, "[]").unwrap();

        let feed = SnapshotFeed::new(&path);
        assert!(feed.load().await.unwrap().is_empty());

        std::fs::write(&path, PAYLOAD).unwrap();
        assert_eq!(feed.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let feed = SnapshotFeed::new(dir.path().join("absent.json"));
        let err = feed.load().await.unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[tokio::test]
    async fn malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let err = SnapshotFeed::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }
}
