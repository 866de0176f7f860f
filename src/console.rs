// src/console.rs

//! Coloured console output for per-file results and the final report.

use std::io::Write;

use tracing::debug;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const NORMAL: &str = "\x1b[0m";

/// Colour of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Pass,
    Fail,
}

/// Whether a line is part of the per-file pass/fail listing (hidden by
/// `--quiet`) or a diagnostic that is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Result,
    Diagnostic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub kind: LineKind,
    pub tone: Tone,
    pub text: String,
}

impl ConsoleLine {
    pub fn result(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Result,
            tone,
            text: text.into(),
        }
    }

    pub fn diagnostic(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Diagnostic,
            tone,
            text: text.into(),
        }
    }
}

/// ANSI colouring, disabled by `NO_COLOR` or `NODE_DISABLE_COLORS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn from_env() -> Self {
        let disabled = ["NO_COLOR", "NODE_DISABLE_COLORS"]
            .iter()
            .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()));
        Self::new(!disabled)
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Normal => text.to_string(),
            Tone::Pass => format!("{GREEN}{text}{NORMAL}"),
            Tone::Fail => format!("{RED}{text}{NORMAL}"),
        }
    }
}

/// Line-oriented console sink.
pub struct Console {
    out: Box<dyn Write + Send>,
    palette: Palette,
    quiet: bool,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("palette", &self.palette)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>, palette: Palette, quiet: bool) -> Self {
        Self {
            out,
            palette,
            quiet,
        }
    }

    pub fn stdout(palette: Palette, quiet: bool) -> Self {
        Self::new(Box::new(std::io::stdout()), palette, quiet)
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn emit(&mut self, line: &ConsoleLine) {
        if self.quiet && line.kind == LineKind::Result {
            return;
        }
        self.write_line(line.tone, &line.text);
    }

    pub fn emit_all(&mut self, lines: &[ConsoleLine]) {
        for line in lines {
            self.emit(line);
        }
    }

    /// Immediate warning, shown even in quiet mode.
    pub fn warn(&mut self, text: &str) {
        self.write_line(Tone::Fail, text);
    }

    /// Write pre-rendered text as is.
    pub fn write_raw(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            debug!(error = %e, "console write failed");
        }
    }

    fn write_line(&mut self, tone: Tone, text: &str) {
        let painted = self.palette.paint(tone, text);
        if let Err(e) = writeln!(self.out, "{painted}") {
            debug!(error = %e, "console write failed");
        }
    }
}
