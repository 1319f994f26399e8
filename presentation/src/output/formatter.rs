//! Output formatter trait

use consult_domain::CaseRecord;

/// Trait for formatting case records
pub trait OutputFormatter {
    /// Labelled transcript of the whole consultation
    fn format(&self, record: &CaseRecord) -> String;

    /// Format as JSON
    fn format_json(&self, record: &CaseRecord) -> String;

    /// One line naming where the record went
    fn format_saved(&self, path: &str) -> String;
}
