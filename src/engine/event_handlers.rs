// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::classify::{Classification, Verdict};
use crate::convert::ConversionOutcome;
use crate::discover::TestItem;
use crate::engine::slot::WorkSlot;
use crate::engine::{RunEnd, RuntimeOptions, Task};
use crate::report::RunState;
use crate::types::CrashPolicy;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Hand this task to the converter.
    Activate(Task),
    /// Classify this outcome (may call the validator), print it, and feed
    /// the result back as `RuntimeEvent::TaskClassified`.
    Classify(ConversionOutcome),
    /// The run is over.
    Finish(RunEnd),
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn carry_on() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }

    fn command(command: CoreCommand) -> Self {
        Self {
            commands: vec![command],
            keep_running: true,
        }
    }

    pub(crate) fn finish(end: RunEnd) -> Self {
        Self {
            commands: vec![CoreCommand::Finish(end)],
            keep_running: false,
        }
    }
}

/// Handle a task admitted by discovery.
///
/// The task is queued; if the slot is idle (which includes the very first
/// task of a run) the next pending task is activated straight away.
pub fn handle_task_enqueued(slot: &mut WorkSlot, state: &mut RunState, task: Task) -> CoreStep {
    state.record_discovered();
    slot.push(task);

    match slot.activate_next() {
        Some(next) => CoreStep::command(CoreCommand::Activate(next)),
        None => CoreStep::carry_on(),
    }
}

/// Handle a candidate that discovery dropped.
pub fn handle_item_skipped(
    state: &mut RunState,
    path: PathBuf,
    warning: Option<String>,
) -> CoreStep {
    state.record_discovered();
    state.record_skip();
    debug!(path = %path.display(), warned = warning.is_some(), "candidate skipped");
    if let Some(warning) = warning {
        state.record_warning(warning);
    }
    CoreStep::carry_on()
}

/// Handle a discovery warning not tied to a candidate.
pub fn handle_warning(state: &mut RunState, warning: String) -> CoreStep {
    state.record_warning(warning);
    CoreStep::carry_on()
}

/// Handle the end of discovery.
pub fn handle_discovery_finished(slot: &mut WorkSlot) -> CoreStep {
    slot.mark_discovery_finished();
    info!(pending = slot.pending_len(), active = !slot.is_idle(), "discovery finished");

    if slot.is_drained() {
        CoreStep::finish(RunEnd::Completed)
    } else {
        CoreStep::carry_on()
    }
}

/// Handle the converter's completion signal.
///
/// The slot stays occupied until the classification comes back, so the
/// next task cannot start before this one is fully reported.
pub fn handle_conversion_finished(slot: &WorkSlot, outcome: ConversionOutcome) -> CoreStep {
    if !slot.is_active(&outcome.item.path) {
        warn!(path = %outcome.item, "completion for a task that is not active; ignoring");
        return CoreStep::carry_on();
    }
    debug!(path = %outcome.item, success = outcome.is_success(), "conversion finished");
    CoreStep::command(CoreCommand::Classify(outcome))
}

/// Handle a finished classification: aggregate, then advance.
pub fn handle_task_classified(
    slot: &mut WorkSlot,
    state: &mut RunState,
    options: &RuntimeOptions,
    classification: Classification,
) -> CoreStep {
    complete_active(
        slot,
        state,
        options,
        &classification.item.path,
        classification.verdict,
    )
}

/// Handle a converter that errored while being invoked.
///
/// The classifier is bypassed; the crash is counted per the configured
/// [`CrashPolicy`] and recorded as a warning.
pub fn handle_converter_crashed(
    slot: &mut WorkSlot,
    state: &mut RunState,
    options: &RuntimeOptions,
    item: TestItem,
    error: String,
) -> CoreStep {
    if !slot.is_active(&item.path) {
        warn!(path = %item, "crash report for a task that is not active; ignoring");
        return CoreStep::carry_on();
    }

    let verdict = crash_verdict(options.crash_policy, item.expect_failure);
    warn!(path = %item, %error, ?verdict, "converter crashed");
    state.record_warning(format!("Converter failed {item}"));

    complete_active(slot, state, options, &item.path, verdict)
}

/// Verdict for a converter crash.
pub fn crash_verdict(policy: CrashPolicy, expect_failure: bool) -> Verdict {
    match policy {
        CrashPolicy::Pass if expect_failure => Verdict::Fail,
        CrashPolicy::Pass => Verdict::Pass,
        CrashPolicy::Fail => Verdict::judge(false, expect_failure),
    }
}

fn complete_active(
    slot: &mut WorkSlot,
    state: &mut RunState,
    options: &RuntimeOptions,
    path: &Path,
    verdict: Verdict,
) -> CoreStep {
    let Some(item) = slot.release(path) else {
        warn!(path = %path.display(), "result for a task that is not active; ignoring");
        return CoreStep::carry_on();
    };

    state.record_verdict(&item, verdict);

    if verdict == Verdict::Fail && options.stop_on_failure {
        info!(path = %item, "stopping on first failure");
        return CoreStep::finish(RunEnd::StoppedOnFailure);
    }

    advance(slot)
}

/// Activate the next pending task, or finish if nothing is left.
fn advance(slot: &mut WorkSlot) -> CoreStep {
    if let Some(next) = slot.activate_next() {
        return CoreStep::command(CoreCommand::Activate(next));
    }
    if slot.is_drained() {
        return CoreStep::finish(RunEnd::Completed);
    }
    // Discovery is still running; the next enqueue activates.
    CoreStep::carry_on()
}
