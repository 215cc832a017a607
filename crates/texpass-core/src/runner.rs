//! Compiler pass runners
//!
//! A runner performs exactly one compiler invocation inside a working area.
//! The renderer drives it once per pass.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use crate::working_area::{JOB_NAME, LOG_FILE};

/// One compiler pass over a document
///
/// Runners must be `Send + Sync` so a single renderer can serve
/// concurrent renders; each render brings its own working area.
pub trait PassRunner: Send + Sync {
    /// Human-readable name of this runner
    fn name(&self) -> &str;

    /// Compile `document` once, writing all output into `working_area`
    ///
    /// Blocks until the pass is complete. Any failure must be reported as
    /// [`RenderError::CompilerInvocationFailed`] pointing at the pass log.
    fn run_pass(&self, document: &str, working_area: &Path) -> Result<()>;
}

/// Fixed compiler arguments: a constant job name and no interactive error
/// recovery
pub fn compiler_args() -> [String; 2] {
    [format!("-jobname={}", JOB_NAME), "-halt-on-error".to_string()]
}

/// Runs a LaTeX-compatible executable as a child process
///
/// The document is fed on stdin, so no source file is written and no file
/// name needs escaping. Compiler stdout and stderr are discarded; the log
/// file holds the diagnostics.
#[derive(Debug, Clone)]
pub struct CompilerRunner {
    command: String,
}

impl CompilerRunner {
    /// Create a runner for an executable name or path
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Create a runner for the command in `options`, defaults applied
    pub fn from_options(options: &RenderOptions) -> Self {
        Self::new(options.resolved_command())
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl PassRunner for CompilerRunner {
    fn name(&self) -> &str {
        &self.command
    }

    fn run_pass(&self, document: &str, working_area: &Path) -> Result<()> {
        let log_path = working_area.join(LOG_FILE);
        let failed = || RenderError::CompilerInvocationFailed {
            log_path: log_path.clone(),
        };

        let mut child = Command::new(&self.command)
            .args(compiler_args())
            .current_dir(working_area)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                log::warn!("Failed to start {}: {}", self.command, e);
                failed()
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(document.as_bytes()) {
                Ok(()) => {}
                // Compiler stopped reading, typically after halting on an
                // error. The exit status tells the rest.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    log::debug!("{} closed stdin early", self.command);
                }
                Err(e) => {
                    log::warn!("Failed to feed document to {}: {}", self.command, e);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(failed());
                }
            }
        }

        let status = child.wait().map_err(|e| {
            log::warn!("Failed to wait for {}: {}", self.command, e);
            failed()
        })?;

        if !status.success() {
            log::warn!(
                "{} failed ({}), log at {}",
                self.command,
                status,
                log_path.display()
            );
            return Err(failed());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_args() {
        assert_eq!(compiler_args(), ["-jobname=texpass", "-halt-on-error"]);
    }

    #[test]
    fn test_from_options_applies_default() {
        let runner = CompilerRunner::from_options(&RenderOptions::default());
        assert_eq!(runner.command(), "pdflatex");
        assert_eq!(runner.name(), "pdflatex");

        let runner = CompilerRunner::from_options(&RenderOptions::new().with_command("xelatex"));
        assert_eq!(runner.command(), "xelatex");
    }

    #[test]
    fn test_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CompilerRunner::new("/nonexistent/texpass-compiler");
        let err = runner.run_pass("hello", dir.path()).unwrap_err();
        match err {
            RenderError::CompilerInvocationFailed { log_path } => {
                assert_eq!(log_path, dir.path().join(LOG_FILE));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        fn write_script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-latex");
            fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
            let mut perms = fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).unwrap();
            path
        }

        #[test]
        fn test_invocation_contract() {
            let bin = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            let script = write_script(
                bin.path(),
                r#"printf '%s\n' "$@" > args.txt
pwd -P > cwd.txt
cat > stdin.txt
echo "%PDF-1.5" > texpass.pdf
"#,
            );

            let document = "\\documentclass{article}\n\\begin{document}\nHi\n\\end{document}\n";
            let runner = CompilerRunner::new(script.to_string_lossy());
            runner.run_pass(document, work.path()).unwrap();

            let args = fs::read_to_string(work.path().join("args.txt")).unwrap();
            assert_eq!(args, "-jobname=texpass\n-halt-on-error\n");

            let stdin = fs::read_to_string(work.path().join("stdin.txt")).unwrap();
            assert_eq!(stdin, document);

            let cwd = fs::read_to_string(work.path().join("cwd.txt")).unwrap();
            assert_eq!(
                PathBuf::from(cwd.trim()),
                work.path().canonicalize().unwrap()
            );
            assert!(work.path().join("texpass.pdf").exists());
        }

        #[test]
        fn test_nonzero_exit() {
            let bin = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            let script = write_script(
                bin.path(),
                "cat > /dev/null\necho '! Undefined control sequence.' > texpass.log\nexit 1\n",
            );

            let runner = CompilerRunner::new(script.to_string_lossy());
            let err = runner.run_pass("\\error", work.path()).unwrap_err();
            assert!(matches!(err, RenderError::CompilerInvocationFailed { .. }));
            assert!(err.to_string().starts_with("Compiler error. Check "));
            assert!(err.to_string().ends_with("texpass.log"));
        }

        #[test]
        fn test_compiler_ignoring_stdin() {
            let bin = tempfile::tempdir().unwrap();
            let work = tempfile::tempdir().unwrap();
            let script = write_script(bin.path(), "exit 0\n");

            // Larger than any pipe buffer, so the write hits a closed pipe
            let document = "x".repeat(4 * 1024 * 1024);
            let runner = CompilerRunner::new(script.to_string_lossy());
            assert!(runner.run_pass(&document, work.path()).is_ok());
        }
    }
}
