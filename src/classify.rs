// src/classify.rs

//! Turns one completed conversion into a pass/fail verdict plus the console
//! lines describing it.

use serde_json::Value;
use tracing::debug;

use crate::console::{ConsoleLine, Tone};
use crate::convert::ConversionOutcome;
use crate::discover::TestItem;
use crate::validate::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// `Pass` exactly when `succeeded` disagrees with `expect_failure`:
    /// a success that was expected, or a failure that was expected.
    pub fn judge(succeeded: bool, expect_failure: bool) -> Self {
        if succeeded ^ expect_failure {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }

    fn tone(self) -> Tone {
        match self {
            Verdict::Pass => Tone::Pass,
            Verdict::Fail => Tone::Fail,
        }
    }
}

/// Result of classifying one task.
#[derive(Debug, Clone)]
pub struct Classification {
    pub item: TestItem,
    pub verdict: Verdict,
    /// Lines to print for this file, in order.
    pub lines: Vec<ConsoleLine>,
}

/// Judges conversion outcomes, invoking the validator when the conversion
/// produced a usable document.
pub struct ResultClassifier {
    validator: Box<dyn Validator>,
    verbose: u8,
}

impl std::fmt::Debug for ResultClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultClassifier")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl ResultClassifier {
    pub fn new(validator: Box<dyn Validator>, verbose: u8) -> Self {
        Self { validator, verbose }
    }

    pub async fn classify(&self, outcome: ConversionOutcome) -> Classification {
        let ConversionOutcome {
            item,
            source,
            result,
            context,
        } = outcome;
        let file = item.to_string();

        let document = match result {
            Ok(document) => document,
            Err(message) => {
                let verdict = Verdict::judge(false, item.expect_failure);
                debug!(path = %item, %message, ?verdict, "converter reported failure");
                let mut lines = vec![ConsoleLine::diagnostic(Tone::Normal, file)];
                if self.verbose > 0 {
                    if let Some(last) = context.last() {
                        lines.push(ConsoleLine::diagnostic(Tone::Fail, last.clone()));
                    }
                }
                lines.push(ConsoleLine::diagnostic(
                    Tone::Fail,
                    format!("Converter: {message}"),
                ));
                return Classification {
                    item,
                    verdict,
                    lines,
                };
            }
        };

        if let Err(problem) = check_representable(&document) {
            let verdict = Verdict::judge(false, item.expect_failure);
            debug!(path = %item, %problem, ?verdict, "converted document rejected");
            let mut lines = vec![ConsoleLine::diagnostic(Tone::Normal, file)];
            if let Some(last) = context.last() {
                lines.push(ConsoleLine::diagnostic(Tone::Fail, last.clone()));
            }
            lines.push(ConsoleLine::diagnostic(Tone::Fail, problem));
            return Classification {
                item,
                verdict,
                lines,
            };
        }

        let validation = self.validator.validate(&item, &document).await;
        let verdict = Verdict::judge(validation.valid, item.expect_failure);
        debug!(
            path = %item,
            valid = validation.valid,
            expect_failure = item.expect_failure,
            ?verdict,
            "classified document"
        );

        let tone = verdict.tone();
        let mut lines = vec![
            ConsoleLine::result(Tone::Normal, file),
            ConsoleLine::result(tone, format!("  {} {}", source.title(), source.version())),
            ConsoleLine::result(tone, format!("  {}", source.endpoint())),
        ];
        if self.verbose > 0 && !verdict.is_pass() {
            lines.extend(
                validation
                    .diagnostics
                    .iter()
                    .map(|d| ConsoleLine::diagnostic(Tone::Fail, format!("    {d}"))),
            );
        }

        Classification {
            item,
            verdict,
            lines,
        }
    }
}

/// The converted document must survive serialization to YAML and must not
/// collapse to an empty document.
pub fn check_representable(document: &Value) -> Result<(), String> {
    let text = serde_yaml::to_string(document)
        .map_err(|e| format!("converted document is not representable as YAML: {e}"))?;
    let text = text.trim();
    if document.is_null() || text == "{}" || text == "null" {
        return Err("converted document is empty".to_string());
    }
    Ok(())
}
