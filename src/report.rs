// src/report.rs

//! Run-wide aggregate and the end-of-run report.

use std::fmt::Write as _;
use std::path::PathBuf;

use tracing::info;

use crate::classify::Verdict;
use crate::console::{Palette, Tone};
use crate::discover::TestItem;
use crate::exit_codes;

/// Counters and lists accumulated over one run.
///
/// Owned by the core runtime; only its event handlers write to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    pub pass_count: usize,
    pub fail_count: usize,
    /// Candidates that were filtered out, unreadable, unparsable or had no
    /// version marker.
    pub skipped_count: usize,
    /// Every candidate discovery produced, whatever became of it.
    pub discovered_count: usize,
    /// Paths of failed tasks, in classification order.
    pub failure_paths: Vec<PathBuf>,
    /// Warnings, in the order they happened.
    pub warnings: Vec<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_discovered(&mut self) {
        self.discovered_count += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped_count += 1;
    }

    pub fn record_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn record_verdict(&mut self, item: &TestItem, verdict: Verdict) {
        match verdict {
            Verdict::Pass => self.pass_count += 1,
            Verdict::Fail => {
                self.fail_count += 1;
                self.failure_paths.push(item.path.clone());
            }
        }
    }

    /// Tasks classified so far.
    pub fn classified_count(&self) -> usize {
        self.pass_count + self.fail_count
    }

    /// Every discovered candidate has been classified or skipped.
    pub fn is_settled(&self) -> bool {
        self.classified_count() + self.skipped_count == self.discovered_count
    }
}

/// End-of-run report, with warnings and failures sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub warnings: Vec<String>,
    pub failures: Vec<String>,
    pub passing: usize,
    pub failing: usize,
}

impl Report {
    pub fn summary_line(&self) -> String {
        format!(
            "Tests: {} passing, {} failing, {} warnings",
            self.passing,
            self.failing,
            self.warnings.len()
        )
    }

    pub fn render(&self, palette: &Palette) -> String {
        let mut out = String::new();

        if !self.warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for w in &self.warnings {
                let _ = writeln!(out, "{}", palette.paint(Tone::Fail, w));
            }
        }

        if !self.failures.is_empty() {
            let _ = writeln!(out, "\nFailures:");
            for f in &self.failures {
                let _ = writeln!(out, "{}", palette.paint(Tone::Fail, f));
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.summary_line());
        out
    }
}

/// Build the report and exit code for a finished run.
///
/// The exit code is [`exit_codes::OK`] only if nothing failed and at least
/// one document passed; a run that admitted nothing is a failure.
pub fn finalize(state: &RunState) -> (Report, i32) {
    let mut warnings = state.warnings.clone();
    warnings.sort();

    let mut failures: Vec<String> = state
        .failure_paths
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    failures.sort();

    let code = if state.fail_count == 0 && state.pass_count > 0 {
        exit_codes::OK
    } else {
        exit_codes::FAILED
    };

    info!(
        pass = state.pass_count,
        fail = state.fail_count,
        skipped = state.skipped_count,
        warnings = warnings.len(),
        code,
        "run finalized"
    );

    let report = Report {
        warnings,
        failures,
        passing: state.pass_count,
        failing: state.fail_count,
    };
    (report, code)
}
