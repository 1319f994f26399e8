//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished consultation is shown on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Labelled turn-by-turn transcript (default)
    #[default]
    Transcript,
    /// The case record as JSON
    Json,
    /// Nothing beyond the saved-record notice
    Quiet,
}
