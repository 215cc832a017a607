//! texpass-core - LaTeX to PDF by driving an external compiler
//!
//! The compiler is treated as a black box: it reads the document on stdin,
//! writes a PDF and a log into its working directory, and reports failure
//! through its exit status. This crate decides how many passes to run,
//! watches the log for rerun requests, and owns the working directory.
//!
//! # Pipeline
//!
//! 1. **WorkingArea** - a fresh temporary directory per render
//! 2. **Runner** - one compiler invocation per pass
//! 3. **Rerun detection** - scan the log for `Rerun to get` (auto mode)
//! 4. **Artifact** - read `texpass.pdf`, then delete the directory
//!
//! When anything fails the directory is kept and the error tells you where
//! the log is.
//!
//! # Example
//!
//! ```no_run
//! use texpass_core::{render, RenderOptions};
//!
//! let document = r"
//!     \documentclass[12pt]{article}
//!     \begin{document}
//!     This is a LaTeX document.
//!     \end{document}
//! ";
//! let options = RenderOptions::new().with_command("/usr/bin/pdflatex").with_runs(1);
//!
//! match render(document, &options) {
//!     Ok(pdf) => println!("{} bytes", pdf.len()),
//!     Err(e) => eprintln!("render failed: {}", e),
//! }
//! ```

pub mod config;
pub mod error;
pub mod options;
pub mod renderer;
pub mod rerun;
pub mod runner;
pub mod working_area;

pub use config::{Settings, CONFIG_FILE};
pub use error::{ConfigError, RenderError, Result};
pub use options::{PassMode, RenderOptions, DEFAULT_COMMAND, MAX_AUTO_RUNS};
pub use renderer::{RenderedDocument, Renderer};
pub use rerun::{needs_rerun, RERUN_MARKER};
pub use runner::{compiler_args, CompilerRunner, PassRunner};
pub use working_area::{WorkingArea, ARTIFACT_FILE, JOB_NAME, LOG_FILE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render a document to PDF bytes
///
/// On error the working area is left in place so its log can be read; the
/// error message contains its path.
pub fn render(document: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    Renderer::new(options.clone()).render(document)
}

/// Render a document and report the number of passes used
pub fn render_with_metadata(document: &str, options: &RenderOptions) -> Result<RenderedDocument> {
    Renderer::new(options.clone()).render_with_metadata(document)
}
