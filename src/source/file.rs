//! File-based data source.
//!
//! Polls a JSON file holding the full health history.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::data::{HealthSample, HealthUpdate};

use super::DataSource;

/// A data source that reads the health history from a JSON file.
///
/// The file holds the whole series as a JSON array of `{"time", "score"}`
/// objects, most-recent-last - the format the gateway's health probe writes.
/// The source tracks the file's modification time and only re-reads when the
/// file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Vec<HealthSample>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(history) => {
                    self.last_error = None;
                    Some(history)
                }
                Err(e) => {
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<HealthUpdate> {
        let current_modified = self.get_modified_time();

        // Check if the file has been modified since the last read
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep last history
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(history) = self.read_file() {
                self.last_modified = current_modified;
                return Some(HealthUpdate::Replace(history));
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"[
            { "time": "08:00", "score": 92.5 },
            { "time": "09:00", "score": 88.0 }
        ]"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/health.json");
        assert_eq!(source.path(), Path::new("/tmp/health.json"));
        assert_eq!(source.description(), "file: /tmp/health.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_history() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        // First poll should return the whole history
        let update = source.poll();
        let Some(HealthUpdate::Replace(history)) = update else {
            panic!("expected a Replace update");
        };
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].time, "08:00");
        assert_eq!(history[1].score, 88.0);

        // Second poll without a file change should return None
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_detects_changes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        let _ = source.poll();

        // Modify the file (mtime granularity needs a short pause)
        std::thread::sleep(std::time::Duration::from_millis(10));
        writeln!(file, " ").unwrap();
        file.flush().unwrap();

        assert!(source.poll().is_some());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/health.json");
        assert!(source.poll().is_none());
        assert!(source.error().is_some());
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().starts_with("Parse error"));
    }
}
