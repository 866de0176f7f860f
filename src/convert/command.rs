// src/convert/command.rs

//! Converter backed by an external command.
//!
//! The source document is written to the command's stdin as JSON. A zero
//! exit status with JSON or YAML on stdout is a successful conversion;
//! anything else is a failed one. Stderr lines become diagnostic context.

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, error, info};

use crate::convert::{CompletionTx, ConversionOutcome, ConversionRequest, Converter};
use crate::discover::parse_structured;
use crate::errors::{Error, Result};
use crate::exec::{collect_output, spawn_shell};

/// Real converter used in production.
pub struct CommandConverter {
    cmd: String,
    completion_tx: CompletionTx,
}

impl CommandConverter {
    pub fn new(cmd: impl Into<String>, completion_tx: CompletionTx) -> Self {
        Self {
            cmd: cmd.into(),
            completion_tx,
        }
    }
}

impl Converter for CommandConverter {
    fn convert(
        &mut self,
        request: ConversionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the spawned task doesn't borrow `self`.
        let tx = self.completion_tx.clone();
        let cmd = self.cmd.clone();

        Box::pin(async move {
            let input = serde_json::to_vec(&request.source.content).map_err(Error::from)?;
            let envs = [
                ("SPECSWEEP_FILE", request.item.path.display().to_string()),
                ("SPECSWEEP_RESOLVE", flag(request.options.resolve)),
                ("SPECSWEEP_PATCH", flag(request.options.patch)),
                ("SPECSWEEP_VERBOSE", request.options.verbose.to_string()),
                ("SPECSWEEP_ENCODING", request.options.encoding.to_string()),
            ];
            let child = spawn_shell(&cmd, &envs)?;

            info!(path = %request.item, "conversion started");
            tokio::spawn(async move {
                let outcome = finish_conversion(request, child, input).await;
                if tx.send(outcome).is_err() {
                    debug!("runtime gone before conversion finished");
                }
            });
            Ok(())
        })
    }
}

async fn finish_conversion(
    request: ConversionRequest,
    child: tokio::process::Child,
    input: Vec<u8>,
) -> ConversionOutcome {
    let output = match collect_output(child, input).await {
        Ok(output) => output,
        Err(err) => {
            error!(path = %request.item, error = %err, "converter process error");
            return ConversionOutcome::failed(request, err.to_string(), Vec::new());
        }
    };

    let context = output.stderr_lines;
    if !output.success {
        let message = format!("converter exited with status {}", output.code);
        return ConversionOutcome::failed(request, message, context);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_structured(&stdout) {
        Ok(document) => ConversionOutcome::succeeded(request, document, context),
        Err(err) => {
            debug!(path = %request.item, error = %err, "unparsable converter output");
            ConversionOutcome::failed(request, "converter output is not JSON or YAML", context)
        }
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}
