//! Console output formatter for consultation results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use consult_domain::{CaseRecord, Stage};

/// Formats case records for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete consultation as a labelled transcript
    pub fn format(record: &CaseRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Consultation Transcript"));
        output.push('\n');

        for (stage, text) in Self::turns(record) {
            output.push_str(&Self::turn(stage, text));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(record: &CaseRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_saved(path: &str) -> String {
        format!("{} {}", "Case saved to".green().bold(), path)
    }

    /// One labelled turn; stages without a transcript label render nothing
    pub fn turn(stage: Stage, text: &str) -> String {
        match stage.transcript_label() {
            Some(label) => format!(
                "\n{}\n{}\n",
                format!("{}:", label).yellow().bold(),
                Self::indent(text.trim_end(), "  ")
            ),
            None => String::new(),
        }
    }

    /// Banner printed before each run when several run in one process
    pub fn run_header(run: u32, total: u32) -> String {
        Self::section_header(&format!("Consultation {} of {}", run, total))
    }

    fn turns(record: &CaseRecord) -> [(Stage, &str); 6] {
        [
            (Stage::GeneratePatientSymptom, record.symptoms.as_str()),
            (Stage::Diagnose, record.diagnosis.as_str()),
            (Stage::Prescribe, record.medication.as_str()),
            (Stage::Validate, record.validation.as_str()),
            (Stage::FinalReview, record.summary.as_str()),
            (Stage::Feedback, record.feedback.as_str()),
        ]
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, record: &CaseRecord) -> String {
        Self::format(record)
    }

    fn format_json(&self, record: &CaseRecord) -> String {
        Self::format_json(record)
    }

    fn format_saved(&self, path: &str) -> String {
        Self::format_saved(path)
    }
}
