// src/convert/mod.rs

//! Converter abstraction.
//!
//! The scheduler talks to a [`Converter`] instead of a concrete process
//! runner. This makes it easy to swap in a fake converter in tests while
//! keeping the production implementation in [`command`].
//!
//! Completion contract: `convert` resolves once the conversion has been
//! started (or finished). The result is reported by sending exactly one
//! [`ConversionOutcome`] on the completion channel, before or after
//! `convert` resolves. The channel is unbounded, so reporting never waits
//! on the runtime. An `Err` from `convert` means the converter itself broke
//! while being invoked; no outcome may follow it.

pub mod command;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::discover::{ParsedDocument, TestItem};
use crate::errors::Result;
use crate::types::Encoding;

pub use command::CommandConverter;

/// Sending half of the completion channel, held by a converter.
pub type CompletionTx = mpsc::UnboundedSender<ConversionOutcome>;
/// Receiving half of the completion channel, read by the runtime.
pub type CompletionRx = mpsc::UnboundedReceiver<ConversionOutcome>;

/// Channel carrying conversion outcomes from a converter to the runtime.
pub fn completion_channel() -> (CompletionTx, CompletionRx) {
    mpsc::unbounded_channel()
}

/// Options handed to the converter. Every task carries its own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Resolve external `$ref`s.
    pub resolve: bool,
    /// Verbosity requested on the command line.
    pub verbose: u8,
    /// Ask the converter to patch minor errors in the source.
    pub patch: bool,
    pub encoding: Encoding,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            resolve: false,
            verbose: 0,
            patch: true,
            encoding: Encoding::default(),
        }
    }
}

/// One conversion handed to a [`Converter`].
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub item: TestItem,
    pub source: ParsedDocument,
    pub options: ConvertOptions,
}

/// What a converter reported for one request.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub item: TestItem,
    pub source: ParsedDocument,
    /// The converted document, or the failure message.
    pub result: std::result::Result<Value, String>,
    /// Diagnostic context captured while converting, most recent last.
    pub context: Vec<String>,
}

impl ConversionOutcome {
    pub fn succeeded(request: ConversionRequest, document: Value, context: Vec<String>) -> Self {
        Self {
            item: request.item,
            source: request.source,
            result: Ok(document),
            context,
        }
    }

    pub fn failed(
        request: ConversionRequest,
        message: impl Into<String>,
        context: Vec<String>,
    ) -> Self {
        Self {
            item: request.item,
            source: request.source,
            result: Err(message.into()),
            context,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Trait abstracting how documents are converted.
///
/// Production code uses [`CommandConverter`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait Converter: Send {
    /// Start converting the given request. See the module docs for the
    /// completion contract.
    fn convert(
        &mut self,
        request: ConversionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
