//! texpass CLI - Command-line interface library
//!
//! This library provides the CLI functionality for texpass:
//! - Render: Compile a LaTeX document to PDF
//! - Check-rerun: Inspect a working directory's log
//! - Config: Show the effective settings
//!
//! # Library Usage
//!
//! ```ignore
//! use texpass_cli::{load_settings, render_command, SettingsArgs};
//!
//! let settings = load_settings(&SettingsArgs::default(), Some(&input))?;
//! render_command(&input, None, &settings)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Render with auto-detected pass count
//! texpass render paper.tex
//!
//! # Exactly two passes with xelatex, PDF to stdout
//! texpass render paper.tex -c xelatex -r 2 -o - > paper.pdf
//!
//! # After a failure, check the kept working directory
//! texpass check-rerun /tmp/texpass-Ab12Cd
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{check_rerun_command, config_command, render_command};
pub use app::{init_logging, load_settings, run_cli, SettingsArgs};
