// src/exec/process.rs

//! Individual process runner.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Output of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub success: bool,
    /// Exit code, `-1` when killed by a signal.
    pub code: i32,
    pub stdout: Vec<u8>,
    /// Non-empty stderr lines, in order.
    pub stderr_lines: Vec<String>,
}

/// Spawn `cmd_line` through the platform shell with piped stdio.
///
/// Spawning is synchronous; an error here means the command could not be
/// started at all.
pub fn spawn_shell(cmd_line: &str, envs: &[(&str, String)]) -> Result<Child> {
    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd_line);
        c
    };

    for (key, value) in envs {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd
        .spawn()
        .with_context(|| format!("spawning process for command '{cmd_line}'"))?;

    info!(cmd = %cmd_line, pid = ?child.id(), "started process");
    Ok(child)
}

/// Write `input` to the child's stdin, close it, and wait for the process
/// to exit while collecting stdout and stderr.
pub async fn collect_output(mut child: Child, input: Vec<u8>) -> Result<ProcessOutput> {
    // Feed stdin from its own task so a child that writes before it has
    // read everything cannot deadlock against us.
    if let Some(mut stdin) = child.stdin.take() {
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(&input).await {
                debug!(error = %e, "child closed stdin early");
            }
            // Dropping stdin closes the pipe.
        });
    }

    let output = child
        .wait_with_output()
        .await
        .context("waiting for process output")?;

    let code = output.status.code().unwrap_or(-1);
    let stderr_lines = String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    debug!(
        exit_code = code,
        success = output.status.success(),
        stdout_bytes = output.stdout.len(),
        "process exited"
    );

    Ok(ProcessOutput {
        success: output.status.success(),
        code,
        stdout: output.stdout,
        stderr_lines,
    })
}
