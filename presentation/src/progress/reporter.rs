//! Progress reporting for consultation runs

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use consult_application::ports::progress::ProgressNotifier;
use consult_domain::{Stage, util::truncate_chars};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: Stage) -> &'static str {
        match stage {
            Stage::GeneratePatientSymptom => "Patient describing symptoms",
            Stage::Recall => "Recalling similar cases",
            Stage::Diagnose => "Doctor diagnosing",
            Stage::Prescribe => "Pharmacist prescribing",
            Stage::Validate => "Checking against knowledge base",
            Stage::FinalReview => "Validator summarizing",
            Stage::Feedback => "Patient giving feedback",
            Stage::Finalize => "Saving case record",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_stage_complete(&self, _stage: Stage, output: &str) {
        let Ok(mut slot) = self.stage_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            let preview = truncate_chars(output.lines().next().unwrap_or(""), 50);
            pb.finish_with_message(format!("{} {}", "v".green(), preview.dimmed()));
        }
    }
}

/// Prints each labelled turn as soon as its stage finishes
pub struct TranscriptProgress;

impl ProgressNotifier for TranscriptProgress {
    fn on_stage_start(&self, _stage: Stage) {}

    fn on_stage_complete(&self, stage: Stage, output: &str) {
        let turn = ConsoleFormatter::turn(stage, output);
        if !turn.is_empty() {
            print!("{}", turn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_has_display_name() {
        for stage in Stage::ALL {
            assert!(!ProgressReporter::stage_display_name(stage).is_empty());
        }
    }

    #[test]
    fn test_complete_without_start_is_noop() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_complete(Stage::Diagnose, "Migraine");
        assert!(reporter.stage_bar.lock().unwrap().is_none());
    }
}
