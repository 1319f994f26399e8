//! Persistence port for finished case records

use consult_domain::CaseRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode case record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable destination for a complete [`CaseRecord`].
///
/// Called at most once per consultation, after every stage has succeeded.
pub trait CaseRecordSink: Send + Sync {
    fn persist(&self, record: &CaseRecord) -> Result<(), PersistenceError>;
}
