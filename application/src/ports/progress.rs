//! Progress notification port
//!
//! Defines the interface for reporting progress during a consultation.

use consult_domain::{CaseRecord, Stage};

/// Callback for progress updates during a consultation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, transcript, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage);

    /// Called when a stage produced its output
    fn on_stage_complete(&self, stage: Stage, output: &str);

    /// Called once the record has been handed to the sink
    fn on_record_persisted(&self, _record: &CaseRecord) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage) {}
    fn on_stage_complete(&self, _stage: Stage, _output: &str) {}
}
