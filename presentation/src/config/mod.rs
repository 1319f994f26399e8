//! Presentation-level configuration
//!
//! Resolves how results are shown from CLI flags and file settings.

use consult_domain::OutputFormat;

/// Output settings after CLI flags have been applied over file settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show spinners or live turns while stages run
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// CLI format wins over the file format; `--quiet` only hides progress.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color,
            show_progress: !quiet && format != OutputFormat::Quiet,
        }
    }

    /// Status lines go to stderr when stdout carries machine-readable output.
    pub fn status_to_stderr(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
