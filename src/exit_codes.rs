//! Stable exit codes for the `specsweep` CLI.

/// At least one document passed and none failed.
pub const OK: i32 = 0;
/// Any failure, a run that admitted no documents, an aborted run, or an
/// invalid configuration.
pub const FAILED: i32 = 1;
