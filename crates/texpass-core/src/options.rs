//! Render options
//!
//! Controls which compiler is run and how many passes it gets.

use serde::{Deserialize, Serialize};

/// Compiler used when no command is configured, resolved through `PATH`
pub const DEFAULT_COMMAND: &str = "pdflatex";

/// Pass ceiling in auto mode
///
/// A document whose log keeps asking for another pass would otherwise loop
/// forever. Callers needing more passes must set an explicit run count.
pub const MAX_AUTO_RUNS: u32 = 5;

/// How many passes a render performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// Run exactly this many passes, never consult the log
    Fixed(u32),
    /// Rerun while the log requests it, up to [`MAX_AUTO_RUNS`]
    Auto,
}

/// Options for a render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Executable name or path. Empty means [`DEFAULT_COMMAND`]; use a full
    /// path when `PATH` is not set in the caller's environment.
    pub command: String,
    /// Number of passes. Zero or negative selects auto mode.
    pub runs: i32,
}

impl RenderOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compiler command
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Set the pass count
    pub fn with_runs(mut self, runs: i32) -> Self {
        self.runs = runs;
        self
    }

    /// Command to execute, with the default applied
    pub fn resolved_command(&self) -> &str {
        if self.command.is_empty() {
            DEFAULT_COMMAND
        } else {
            &self.command
        }
    }

    pub fn mode(&self) -> PassMode {
        match u32::try_from(self.runs) {
            Ok(n) if n > 0 => PassMode::Fixed(n),
            _ => PassMode::Auto,
        }
    }

    /// Upper bound on passes for this configuration
    pub fn max_runs(&self) -> u32 {
        match self.mode() {
            PassMode::Fixed(n) => n,
            PassMode::Auto => MAX_AUTO_RUNS,
        }
    }
}
