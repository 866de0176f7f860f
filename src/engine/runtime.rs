use std::collections::VecDeque;
use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::classify::ResultClassifier;
use crate::console::Console;
use crate::convert::{CompletionRx, ConversionRequest, Converter};
use crate::errors::Result;
use crate::report::RunState;

use super::core::CoreRuntime;
use super::{CoreCommand, RunEnd, RuntimeEvent, Task};

/// What the runtime hands back once the run is over.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub state: RunState,
    pub end: RunEnd,
}

/// Drives the core runtime in response to `RuntimeEvent`s, and delegates
/// conversion to a `Converter` and judging to a `ResultClassifier`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// scheduling semantics. Events produced by the shell itself (crashes,
/// classifications) are fed back into the core before the next channel
/// event is read, so each file is reported in one uninterrupted block.
///
/// Conversion outcomes arrive on their own unbounded channel and take
/// priority over discovery events, so a converter never waits on a
/// discovery backlog.
pub struct Runtime<C: Converter> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    completion_rx: CompletionRx,
    converter: C,
    classifier: ResultClassifier,
    console: Console,
}

impl<C: Converter> fmt::Debug for Runtime<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl<C: Converter> Runtime<C> {
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        completion_rx: CompletionRx,
        converter: C,
        classifier: ResultClassifier,
        console: Console,
    ) -> Self {
        Self {
            core,
            event_rx,
            completion_rx,
            converter,
            classifier,
            console,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes conversion outcomes from `completion_rx`, then
    ///   `RuntimeEvent`s from `event_rx`.
    /// - Feeds them into the core runtime.
    /// - Executes commands returned by the core (convert, classify, finish).
    pub async fn run(mut self) -> Result<RunSummary> {
        info!("specsweep runtime started");

        let end = loop {
            let event = tokio::select! {
                biased;
                Some(outcome) = self.completion_rx.recv() => {
                    Some(RuntimeEvent::ConversionFinished(outcome))
                }
                event = self.event_rx.recv() => event,
            };
            let Some(event) = event else {
                info!("runtime event channel closed; exiting");
                break RunEnd::Interrupted;
            };

            if let Some(end) = self.process(event).await? {
                break end;
            }
        };

        info!(?end, "runtime exiting");
        let (state, _) = self.core.into_parts();
        Ok(RunSummary { state, end })
    }

    /// Process one channel event plus every follow-up event it causes.
    /// Returns the run's end once the core stops.
    async fn process(&mut self, event: RuntimeEvent) -> Result<Option<RunEnd>> {
        let mut events = VecDeque::from([event]);

        while let Some(event) = events.pop_front() {
            debug!(?event, "runtime received event");
            self.echo(&event);

            // Feed the event into the pure core and get commands back.
            let step = self.core.step(event);

            for command in step.commands {
                if let Some(follow_up) = self.execute_command(command).await? {
                    events.push_back(follow_up);
                }
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                return Ok(Some(self.core.end().unwrap_or(RunEnd::Interrupted)));
            }
        }

        Ok(None)
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: CoreCommand) -> Result<Option<RuntimeEvent>> {
        match command {
            CoreCommand::Activate(task) => Ok(self.activate(task).await),
            CoreCommand::Classify(outcome) => {
                let classification = self.classifier.classify(outcome).await;
                self.console.emit_all(&classification.lines);
                Ok(Some(RuntimeEvent::TaskClassified(classification)))
            }
            CoreCommand::Finish(end) => {
                info!(?end, "core issued Finish command");
                Ok(None)
            }
        }
    }

    async fn activate(&mut self, task: Task) -> Option<RuntimeEvent> {
        let Task {
            item,
            document,
            options,
        } = task;
        debug!(path = %item, "invoking converter");

        let request = ConversionRequest {
            item: item.clone(),
            source: document,
            options,
        };

        match self.converter.convert(request).await {
            Ok(()) => None,
            Err(err) => {
                self.console
                    .warn(&format!("Converter threw an error: {err}"));
                Some(RuntimeEvent::ConverterCrashed {
                    item,
                    error: err.to_string(),
                })
            }
        }
    }

    /// Print discovery warnings as they arrive.
    fn echo(&mut self, event: &RuntimeEvent) {
        match event {
            RuntimeEvent::ItemSkipped {
                warning: Some(warning),
                ..
            }
            | RuntimeEvent::Warning(warning) => self.console.warn(warning),
            _ => {}
        }
    }
}
