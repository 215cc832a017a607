//! Multi-pass render orchestration
//!
//! ```text
//! WorkingArea::create
//!      │
//!      ▼
//! ┌──────────────┐   rerun requested and
//! │ run_pass     │◄─ passes < max_runs (auto mode)
//! └──────┬───────┘
//!        │ Err ──► return, working area kept
//!        ▼
//! read artifact ──► Err ──► return, working area kept
//!        │
//!        ▼
//! remove working area (best effort) ──► bytes
//! ```

use crate::error::Result;
use crate::options::{PassMode, RenderOptions};
use crate::rerun::needs_rerun;
use crate::runner::{CompilerRunner, PassRunner};
use crate::working_area::WorkingArea;

/// Rendered document with metadata
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Artifact bytes from the final pass
    pub data: Vec<u8>,
    /// Number of compiler passes performed
    pub passes: u32,
    /// Name of the runner that produced the output
    pub runner: String,
}

impl RenderedDocument {
    /// Check if the data starts with a PDF header
    pub fn is_pdf(&self) -> bool {
        self.data.starts_with(b"%PDF")
    }
}

/// Drives a [`PassRunner`] until the document is complete
///
/// # Example
///
/// ```no_run
/// use texpass_core::{RenderOptions, Renderer};
///
/// let renderer = Renderer::new(RenderOptions::new().with_runs(2));
/// let pdf = renderer.render(r"\documentclass{article}\begin{document}Hi\end{document}")?;
/// # Ok::<(), texpass_core::RenderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Renderer<R = CompilerRunner> {
    runner: R,
    options: RenderOptions,
}

impl Renderer<CompilerRunner> {
    /// Create a renderer running the compiler named in `options`
    pub fn new(options: RenderOptions) -> Self {
        let runner = CompilerRunner::from_options(&options);
        Self { runner, options }
    }
}

impl<R: PassRunner> Renderer<R> {
    /// Create a renderer with a custom runner
    ///
    /// Only the pass settings of `options` apply; the runner decides what
    /// gets executed.
    pub fn with_runner(runner: R, options: RenderOptions) -> Self {
        Self { runner, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Render a document to artifact bytes
    pub fn render(&self, document: &str) -> Result<Vec<u8>> {
        self.render_with_metadata(document).map(|rendered| rendered.data)
    }

    /// Render a document and report how it was produced
    ///
    /// On error the working area is left on disk; the error names it.
    pub fn render_with_metadata(&self, document: &str) -> Result<RenderedDocument> {
        let area = WorkingArea::create()?;
        let mode = self.options.mode();
        let max_runs = self.options.max_runs();
        log::debug!(
            "Rendering in {} ({:?}, at most {} passes)",
            area.path().display(),
            mode,
            max_runs
        );

        let mut passes = 0;
        loop {
            self.runner.run_pass(document, area.path())?;
            passes += 1;
            log::debug!("Pass {} of {} finished", passes, self.runner.name());

            if passes >= max_runs {
                break;
            }
            if mode == PassMode::Auto && !needs_rerun(area.path()) {
                break;
            }
            log::debug!("Log requests another pass");
        }

        let data = area.read_artifact()?;

        // Only a successful render cleans up.
        let dir = area.path().to_path_buf();
        if let Err(e) = area.remove() {
            log::warn!("Failed to remove working area {}: {}", dir.display(), e);
        }

        log::info!(
            "Rendered {} bytes in {} pass(es) with {}",
            data.len(),
            passes,
            self.runner.name()
        );
        Ok(RenderedDocument {
            data,
            passes,
            runner: self.runner.name().to_string(),
        })
    }
}
