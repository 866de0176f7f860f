// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - invoking the converter and the classifier
//! - printing
//!
//! The core is intended to be extensively tested without any Tokio,
//! channels, filesystem, or processes.

use crate::engine::event_handlers::{
    handle_conversion_finished, handle_converter_crashed, handle_discovery_finished,
    handle_item_skipped, handle_task_classified, handle_task_enqueued, handle_warning,
    CoreCommand, CoreStep,
};
use crate::engine::slot::WorkSlot;
use crate::engine::{RunEnd, RuntimeEvent, RuntimeOptions};
use crate::report::RunState;

/// Pure core runtime state.
///
/// This owns:
/// - the work slot (pending queue + active task)
/// - the run-wide aggregate
/// - runtime options (e.g. `stop_on_failure`)
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    slot: WorkSlot,
    run_state: RunState,
    options: RuntimeOptions,
    end: Option<RunEnd>,
}

impl CoreRuntime {
    pub fn new(options: RuntimeOptions) -> Self {
        Self {
            slot: WorkSlot::new(options.order),
            run_state: RunState::new(),
            options,
            end: None,
        }
    }

    /// No task is active (for tests).
    pub fn is_idle(&self) -> bool {
        self.slot.is_idle()
    }

    /// Number of tasks waiting (for tests).
    pub fn pending_len(&self) -> usize {
        self.slot.pending_len()
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    /// How the run ended, once it has.
    pub fn end(&self) -> Option<RunEnd> {
        self.end
    }

    pub fn into_parts(self) -> (RunState, Option<RunEnd>) {
        (self.run_state, self.end)
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    ///
    /// Once the run has ended, further events are ignored.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        if let Some(end) = self.end {
            tracing::debug!(?end, ?event, "run already ended; ignoring event");
            return CoreStep {
                commands: Vec::new(),
                keep_running: false,
            };
        }

        let step = match event {
            RuntimeEvent::TaskEnqueued(task) => {
                handle_task_enqueued(&mut self.slot, &mut self.run_state, task)
            }
            RuntimeEvent::ItemSkipped { path, warning } => {
                handle_item_skipped(&mut self.run_state, path, warning)
            }
            RuntimeEvent::Warning(warning) => handle_warning(&mut self.run_state, warning),
            RuntimeEvent::DiscoveryFinished => handle_discovery_finished(&mut self.slot),
            RuntimeEvent::ConversionFinished(outcome) => {
                handle_conversion_finished(&self.slot, outcome)
            }
            RuntimeEvent::ConverterCrashed { item, error } => handle_converter_crashed(
                &mut self.slot,
                &mut self.run_state,
                &self.options,
                item,
                error,
            ),
            RuntimeEvent::TaskClassified(classification) => handle_task_classified(
                &mut self.slot,
                &mut self.run_state,
                &self.options,
                classification,
            ),
            RuntimeEvent::ShutdownRequested => CoreStep::finish(RunEnd::Interrupted),
        };

        for command in &step.commands {
            if let CoreCommand::Finish(end) = command {
                self.end = Some(*end);
            }
        }
        step
    }
}
