//! Per-render temporary directory
//!
//! Every pass of one render runs in the same directory, so auxiliary files
//! written by one pass are visible to the next.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, Result};

/// Job name handed to the compiler. Fixed so that output file names never
/// depend on the input.
pub const JOB_NAME: &str = "texpass";

/// Artifact produced by the compiler for [`JOB_NAME`]
pub const ARTIFACT_FILE: &str = "texpass.pdf";

/// Log written by the compiler for [`JOB_NAME`]
pub const LOG_FILE: &str = "texpass.log";

const DIR_PREFIX: &str = "texpass-";

/// Uniquely named directory owned by a single render
///
/// Dropping a `WorkingArea` leaves the directory on disk. Only
/// [`WorkingArea::remove`] deletes it, and the renderer calls that on
/// success alone.
#[derive(Debug)]
pub struct WorkingArea {
    path: PathBuf,
}

impl WorkingArea {
    /// Create a fresh directory under the system temp dir
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(DIR_PREFIX)
            .tempdir()
            .map_err(RenderError::WorkingAreaCreationFailed)?;
        Ok(Self { path: dir.keep() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.path.join(ARTIFACT_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.path.join(LOG_FILE)
    }

    /// Read the artifact left by the last pass
    pub fn read_artifact(&self) -> Result<Vec<u8>> {
        let path = self.artifact_path();
        fs::read(&path).map_err(|source| RenderError::ArtifactReadFailed { path, source })
    }

    /// Delete the directory and everything in it
    pub fn remove(self) -> io::Result<()> {
        fs::remove_dir_all(&self.path)
    }
}
