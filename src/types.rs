use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Order in which pending tasks are activated once the active one completes.
///
/// - `Lifo`: the most recently enqueued task runs next. Tasks discovered
///   later in a burst are therefore converted before earlier ones. This is
///   the default and matches the ordering existing corpora were recorded
///   with.
/// - `Fifo`: tasks run in discovery order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueOrder {
    #[default]
    Lifo,
    Fifo,
}

impl FromStr for QueueOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lifo" => Ok(QueueOrder::Lifo),
            "fifo" => Ok(QueueOrder::Fifo),
            other => Err(format!(
                "invalid order: {other} (expected \"lifo\" or \"fifo\")"
            )),
        }
    }
}

/// How a converter that errors out while being invoked (instead of
/// reporting a failed conversion) is counted.
///
/// - `Pass`: the task counts as a pass unless it was expected to fail, in
///   which case it counts as a fail.
/// - `Fail`: the crash is treated like any other failed conversion, so it
///   counts as a fail unless the task was expected to fail.
///
/// Either way a warning is recorded and the run continues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrashPolicy {
    #[default]
    Pass,
    Fail,
}

impl FromStr for CrashPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass" => Ok(CrashPolicy::Pass),
            "fail" => Ok(CrashPolicy::Fail),
            other => Err(format!(
                "invalid converter_crash: {other} (expected \"pass\" or \"fail\")"
            )),
        }
    }
}

/// Text encoding used to decode input documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    /// Decode raw file bytes.
    ///
    /// UTF-8 decoding is lossy: invalid sequences become U+FFFD, so a stray
    /// byte in a description does not keep a document out of the run.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8_lossy(bytes).into_owned()
            }
            Encoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Latin1 => "latin1",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "binary" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(format!(
                "unsupported encoding: {other} (expected \"utf8\" or \"latin1\")"
            )),
        }
    }
}
