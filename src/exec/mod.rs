// src/exec/mod.rs

//! External process plumbing shared by the command converter and the
//! command validator.
//!
//! - [`process`] spawns a shell command with piped stdio, feeds it a
//!   document on stdin and collects its output.

pub mod process;

pub use process::{collect_output, spawn_shell, ProcessOutput};
