//! File-based snapshot source.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use busgraph_types::Snapshot;
use tracing::debug;

use super::check_version;

/// Reads one snapshot from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse and validate the file, reporting any failure with the path.
    pub fn load(&self) -> Result<Snapshot> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        check_version(&snapshot)
            .with_context(|| format!("Rejected {}", self.path.display()))?;
        debug!("Read snapshot version {} from {}", snapshot.version, self.path.display());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "version": { "major": 1, "minor": 0 },
            "timestamp_ms": 1703160000000,
            "topics": [
                { "host": "h1", "pid": 1, "process": "snd", "topic": "Hello1",
                  "type": "std::string", "direction": "publisher", "frequency": 100, "size": 18 },
                { "host": "h1", "pid": 2, "process": "rec", "topic": "Hello1",
                  "type": "std::string", "direction": "subscriber" }
            ],
            "processes": [
                { "host": "h1", "pid": 1, "memory": 1000, "cpu": 1.5 },
                { "host": "h1", "pid": 2, "memory": 2000, "cpu": 0.5 }
            ]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/snapshot.json");
        assert_eq!(source.path(), Path::new("/tmp/snapshot.json"));
    }

    #[test]
    fn test_file_source_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let snapshot = FileSource::new(file.path()).load().unwrap();
        assert_eq!(snapshot.timestamp_ms, 1703160000000);
        assert_eq!(snapshot.topics.len(), 2);
        assert_eq!(snapshot.processes.len(), 2);
        assert_eq!(snapshot.publishers().count(), 1);
    }

    #[test]
    fn test_file_source_missing_file() {
        let err = FileSource::new("/nonexistent/path/snapshot.json")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let err = FileSource::new(file.path()).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_file_source_incompatible_version() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"version": {{"major": 99, "minor": 0}}}}"#).unwrap();

        let err = FileSource::new(file.path()).load().unwrap_err();
        assert!(format!("{:#}", err).contains("schema version"));
    }
}
