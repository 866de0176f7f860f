// src/engine/mod.rs

//! Scheduling engine for specsweep.
//!
//! This module ties together:
//! - the pending-task queue
//! - the single work slot (at most one active conversion)
//! - the main runtime event loop that reacts to:
//!   - tasks and skips reported by discovery
//!   - converter completion events
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::path::PathBuf;

use crate::classify::Classification;
use crate::convert::{ConversionOutcome, ConvertOptions};
use crate::discover::{ParsedDocument, TestItem};

/// One admitted document waiting to be converted.
///
/// Carries its own copy of the conversion options so no task can change
/// another's view of them.
#[derive(Debug, Clone)]
pub struct Task {
    pub item: TestItem,
    pub document: ParsedDocument,
    pub options: ConvertOptions,
}

/// Runtime options used by the core.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// End the run at the first failing classification.
    pub stop_on_failure: bool,
    pub order: QueueOrder,
    pub crash_policy: CrashPolicy,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Discovery finished and every task was processed.
    Completed,
    /// Stop mode ended the run at the first failure.
    StoppedOnFailure,
    /// Shutdown was requested (Ctrl-C) or the event channel closed.
    Interrupted,
}

/// Events flowing into the runtime from discovery, the converter and the
/// shell itself.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Discovery admitted a document.
    TaskEnqueued(Task),
    /// Discovery looked at a candidate and dropped it.
    ItemSkipped {
        path: PathBuf,
        warning: Option<String>,
    },
    /// Discovery problem not tied to a candidate.
    Warning(String),
    /// No more tasks will be enqueued.
    DiscoveryFinished,
    /// The converter signalled completion of the active task.
    ConversionFinished(ConversionOutcome),
    /// The converter errored while being invoked.
    ConverterCrashed { item: TestItem, error: String },
    /// The active task's outcome has been classified and printed.
    TaskClassified(Classification),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod queue;
pub mod runtime;
pub mod slot;

pub use core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use queue::PendingQueue;
pub use runtime::{RunSummary, Runtime};
pub use slot::WorkSlot;
pub use crate::types::{CrashPolicy, QueueOrder};
