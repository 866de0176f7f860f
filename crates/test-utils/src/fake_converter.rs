use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use specsweep::convert::{
    CompletionTx, ConversionOutcome, ConversionRequest, ConvertOptions, Converter,
};
use specsweep::errors::Result;

use crate::builders::upgrade;

/// What the fake does for a given path.
#[derive(Debug, Clone)]
pub enum FakeBehaviour {
    /// Produce [`upgrade`] of the source document.
    Upgrade,
    /// Produce this exact document.
    Produce(Value),
    /// Signal a failed conversion with this message.
    Fail(String),
    /// Error out of `convert` itself.
    Crash(String),
}

/// Everything the fake observed.
#[derive(Debug, Clone, Default)]
pub struct FakeLog {
    /// Paths in the order they were handed to the converter.
    pub activated: Vec<PathBuf>,
    /// Options received with each request, same order.
    pub options: Vec<ConvertOptions>,
    pub in_flight: usize,
    pub max_in_flight: usize,
}

/// A fake converter that:
/// - records which documents were converted, and with which options
/// - tracks how many conversions were outstanding at once
/// - reports its outcome either before `convert` resolves or, in deferred
///   mode, later from a spawned task.
pub struct FakeConverter {
    completion_tx: CompletionTx,
    script: HashMap<PathBuf, FakeBehaviour>,
    log: Arc<Mutex<FakeLog>>,
    deferred: bool,
}

impl FakeConverter {
    pub fn new(completion_tx: CompletionTx) -> Self {
        Self {
            completion_tx,
            script: HashMap::new(),
            log: Arc::new(Mutex::new(FakeLog::default())),
            deferred: false,
        }
    }

    pub fn with(mut self, path: &str, behaviour: FakeBehaviour) -> Self {
        self.script.insert(PathBuf::from(path), behaviour);
        self
    }

    /// Complete conversions asynchronously after a short delay.
    pub fn deferred(mut self, val: bool) -> Self {
        self.deferred = val;
        self
    }

    pub fn log(&self) -> Arc<Mutex<FakeLog>> {
        Arc::clone(&self.log)
    }
}

impl Converter for FakeConverter {
    fn convert(
        &mut self,
        request: ConversionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let behaviour = self
            .script
            .get(&request.item.path)
            .cloned()
            .unwrap_or(FakeBehaviour::Upgrade);

        {
            let mut log = self.log.lock().unwrap();
            log.activated.push(request.item.path.clone());
            log.options.push(request.options.clone());
        }

        let outcome = match behaviour {
            FakeBehaviour::Crash(message) => {
                return Box::pin(async move { Err(anyhow::anyhow!(message).into()) });
            }
            FakeBehaviour::Upgrade => {
                let document = upgrade(&request.source.content);
                ConversionOutcome::succeeded(request, document, Vec::new())
            }
            FakeBehaviour::Produce(document) => {
                ConversionOutcome::succeeded(request, document, Vec::new())
            }
            FakeBehaviour::Fail(message) => {
                ConversionOutcome::failed(request, message, vec!["#/definitions".to_string()])
            }
        };

        {
            let mut log = self.log.lock().unwrap();
            log.in_flight += 1;
            log.max_in_flight = log.max_in_flight.max(log.in_flight);
        }

        let tx = self.completion_tx.clone();
        let log = Arc::clone(&self.log);
        let deferred = self.deferred;

        Box::pin(async move {
            let finish = move || {
                log.lock().unwrap().in_flight -= 1;
                tx.send(outcome)
                    .map_err(|_| anyhow::anyhow!("runtime gone before completion"))
            };

            if deferred {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    let _ = finish();
                });
            } else {
                finish()?;
            }
            Ok(())
        })
    }
}
