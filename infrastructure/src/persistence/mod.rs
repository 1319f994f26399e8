//! Case record persistence adapters

pub mod json_file_sink;

pub use json_file_sink::{DEFAULT_RECORD_FILE, JsonFileCaseSink};
