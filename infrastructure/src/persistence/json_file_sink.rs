//! JSON file sink for case records.
//!
//! Writes the record as indented UTF-8 JSON to a fixed path, replacing the
//! previous run's file. The record is written to a sibling temp file first
//! and renamed into place, so readers never see a half-written record.

use consult_application::{CaseRecordSink, PersistenceError};
use consult_domain::CaseRecord;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Well-known file name of the latest case record.
pub const DEFAULT_RECORD_FILE: &str = "last_case_log.json";

/// [`CaseRecordSink`] writing pretty-printed JSON to one file
#[derive(Debug, Clone)]
pub struct JsonFileCaseSink {
    path: PathBuf,
}

impl JsonFileCaseSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_RECORD_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl Default for JsonFileCaseSink {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_FILE)
    }
}

impl CaseRecordSink for JsonFileCaseSink {
    fn persist(&self, record: &CaseRecord) -> Result<(), PersistenceError> {
        let mut json = serde_json::to_string_pretty(record)?;
        json.push('\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp = self.temp_path();
        let mut file = fs::File::create(&temp).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            self.io_error(e)
        })?;

        info!(path = %self.path.display(), "Case record written");
        Ok(())
    }
}
