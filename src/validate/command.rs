use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tracing::{debug, warn};

use crate::discover::TestItem;
use crate::exec::{collect_output, spawn_shell};
use crate::validate::{ValidationOutcome, Validator};

/// Validator backed by an external command: the converted document goes to
/// stdin as JSON, exit status 0 means valid, stderr lines are diagnostics.
#[derive(Debug, Clone)]
pub struct CommandValidator {
    cmd: String,
}

impl CommandValidator {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }

    async fn run(&self, item: &TestItem, document: &Value) -> anyhow::Result<ValidationOutcome> {
        let input = serde_json::to_vec(document)?;
        let envs = [("SPECSWEEP_FILE", item.path.display().to_string())];
        let child = spawn_shell(&self.cmd, &envs)?;
        let output = collect_output(child, input).await?;

        debug!(path = %item, exit_code = output.code, "validator finished");
        if output.success {
            Ok(ValidationOutcome {
                valid: true,
                diagnostics: output.stderr_lines,
            })
        } else {
            let mut diagnostics = output.stderr_lines;
            diagnostics.push(format!("validator exited with status {}", output.code));
            Ok(ValidationOutcome::invalid(diagnostics))
        }
    }
}

impl Validator for CommandValidator {
    fn validate<'a>(
        &'a self,
        item: &'a TestItem,
        document: &'a Value,
    ) -> Pin<Box<dyn Future<Output = ValidationOutcome> + Send + 'a>> {
        Box::pin(async move {
            match self.run(item, document).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(path = %item, error = %err, "validator could not run");
                    ValidationOutcome::invalid(vec![format!("validator error: {err:#}")])
                }
            }
        })
    }
}
