//! CLI command definitions

use clap::{Parser, ValueEnum};
use consult_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for consultation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Labelled transcript of every turn
    Transcript,
    /// Final case record as JSON
    Json,
    /// Only the saved record path
    Quiet,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Transcript => OutputFormat::Transcript,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI arguments for consult-sim
#[derive(Parser, Debug)]
#[command(name = "consult-sim")]
#[command(author, version, about = "Simulated clinical consultation driven by a language model")]
#[command(long_about = r#"
consult-sim plays out a clinical consultation between simulated agents:

1. Patient: a language model invents a symptom description
2. Doctor: diagnoses it, reminded of the most similar past case
3. Pharmacist: recommends medication as a JSON object
4. Knowledge agent: checks the diagnosis and medication for coherence
5. Validator: summarizes the whole case
6. Patient: gives one line of feedback on the advice

The resulting case record is saved as JSON (last_case_log.json by default).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./consult.toml      Project-level config
3. ~/.config/consult-sim/config.toml   Global config

Example:
  consult-sim
  consult-sim --runs 3 --model gpt-4o-mini
  consult-sim --output json --record cases/latest.json
"#)]
pub struct Cli {
    /// Number of consultations to run, sharing one case memory
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Model used for every stage
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(short, long, value_name = "TEMP")]
    pub temperature: Option<f32>,

    /// Where to write the case record
    #[arg(short, long, value_name = "PATH")]
    pub record: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Reject pharmacist output that is not a complete medication object
    #[arg(long)]
    pub validate_schema: bool,

    /// Append a JSONL transcript of every request and response
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Write diagnostic logs to daily-rolling files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
