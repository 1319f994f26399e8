//! Case memory.

pub mod case_memory;

pub use case_memory::{CaseMemory, NO_SIMILAR_CASE};
