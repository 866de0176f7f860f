// src/discover/orchestrator.rs

//! Walks path arguments and hands admitted documents to the scheduler.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::convert::ConvertOptions;
use crate::discover::admission::{is_candidate_name, ParsedDocument};
use crate::discover::decode::decode_document;
use crate::discover::TestItem;
use crate::engine::{RuntimeEvent, Task};
use crate::errors::{Result, SpecsweepError};
use crate::fs::FileSystem;
use crate::types::Encoding;

/// The two groups of path arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSpecs {
    /// Tested normally.
    pub paths: Vec<PathBuf>,
    /// Everything found here is expected to fail.
    pub fail_paths: Vec<PathBuf>,
}

impl PathSpecs {
    pub fn new(paths: Vec<PathBuf>, fail_paths: Vec<PathBuf>) -> Self {
        Self { paths, fail_paths }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.fail_paths.is_empty()
    }

    /// Substitute `default` when no paths at all were given.
    pub fn or_default(mut self, default: &Path) -> Self {
        if self.is_empty() {
            info!(path = %default.display(), "no paths given; scanning default corpus");
            self.paths.push(default.to_path_buf());
        }
        self
    }
}

/// What discovery decided about one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Passed every admission check; becomes a task.
    Admitted(ParsedDocument),
    /// Filtered out by name, or no version marker. No warning.
    Skipped,
    /// Could not be read or parsed.
    Rejected { warning: String },
}

/// Discovers documents and submits them to the scheduler over the runtime
/// event channel.
///
/// Discovery is blocking filesystem work; run it via
/// `tokio::task::spawn_blocking` (or outside any runtime, as tests do).
#[derive(Debug)]
pub struct Orchestrator<F: FileSystem> {
    fs: F,
    encoding: Encoding,
    options: ConvertOptions,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl<F: FileSystem> Orchestrator<F> {
    pub fn new(
        fs: F,
        encoding: Encoding,
        options: ConvertOptions,
        runtime_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            fs,
            encoding,
            options,
            runtime_tx,
        }
    }

    /// Discover everything under `specs`, then report that discovery is
    /// over. `DiscoveryFinished` is sent even if discovery stops early, so
    /// the scheduler can always reach the end of the run.
    pub fn run(self, specs: &PathSpecs) {
        if let Err(err) = self.discover(specs) {
            debug!(error = %err, "discovery stopped early");
        }
        if self.runtime_tx.blocking_send(RuntimeEvent::DiscoveryFinished).is_err() {
            debug!("runtime gone before discovery finished");
        }
    }

    /// Process ordinary paths, then fail paths, in argument order.
    ///
    /// Only fails when the runtime has gone away.
    pub fn discover(&self, specs: &PathSpecs) -> Result<()> {
        info!(
            paths = specs.paths.len(),
            fail_paths = specs.fail_paths.len(),
            "gathering documents"
        );
        for path in &specs.paths {
            self.process_path_spec(path, false)?;
        }
        for path in &specs.fail_paths {
            self.process_path_spec(path, true)?;
        }
        Ok(())
    }

    fn process_path_spec(&self, path: &Path, expect_failure: bool) -> Result<()> {
        if self.fs.is_file(path) {
            return self.check(TestItem::new(path, true, expect_failure));
        }

        if !self.fs.is_dir(path) {
            warn!(path = %path.display(), "path does not exist");
            return self.send(RuntimeEvent::Warning(format!(
                "Could not access path {}",
                path.display()
            )));
        }

        let files = match self.fs.walk_files(path) {
            Ok(files) => files,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "directory walk failed");
                return self.send(RuntimeEvent::Warning(format!(
                    "Could not access path {}",
                    path.display()
                )));
            }
        };

        debug!(path = %path.display(), files = files.len(), "walked directory");
        for file in files {
            self.check(TestItem::new(file, false, expect_failure))?;
        }
        Ok(())
    }

    fn check(&self, item: TestItem) -> Result<()> {
        match self.evaluate(&item) {
            Candidate::Admitted(document) => {
                debug!(path = %item, marker = ?document.marker, "admitted document");
                let task = Task {
                    item,
                    document,
                    options: self.options.clone(),
                };
                self.send(RuntimeEvent::TaskEnqueued(task))
            }
            Candidate::Skipped => self.send(RuntimeEvent::ItemSkipped {
                path: item.path,
                warning: None,
            }),
            Candidate::Rejected { warning } => self.send(RuntimeEvent::ItemSkipped {
                path: item.path,
                warning: Some(warning),
            }),
        }
    }

    /// Run the admission checks for one candidate. Pure apart from reading
    /// the file.
    pub fn evaluate(&self, item: &TestItem) -> Candidate {
        if !item.forced && !is_candidate_name(&item.path) {
            return Candidate::Skipped;
        }

        let bytes = match self.fs.read_bytes(&item.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(path = %item, error = %err, "failed to read file");
                return Candidate::Rejected {
                    warning: format!("Could not read file {item}"),
                };
            }
        };

        let content = match decode_document(&bytes, self.encoding) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %item, error = %err, "failed to parse file");
                return Candidate::Rejected {
                    warning: format!("Could not parse file {item}"),
                };
            }
        };

        match ParsedDocument::admit(content) {
            Some(document) => Candidate::Admitted(document),
            None => {
                debug!(path = %item, "no swagger/openapi field; skipping");
                Candidate::Skipped
            }
        }
    }

    fn send(&self, event: RuntimeEvent) -> Result<()> {
        self.runtime_tx
            .blocking_send(event)
            .map_err(|_| SpecsweepError::ChannelClosed)
    }
}
