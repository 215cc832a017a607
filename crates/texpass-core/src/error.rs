//! Error types for rendering

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for render operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a document
///
/// Every variant raised after the working area exists leaves that directory
/// on disk, so the compiler log can be inspected.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The temporary working area could not be created
    #[error("Failed to create working area: {0}")]
    WorkingAreaCreationFailed(#[source] std::io::Error),

    /// The compiler could not be started or exited unsuccessfully
    #[error("Compiler error. Check {}", log_path.display())]
    CompilerInvocationFailed {
        /// Log file of the failed pass
        log_path: PathBuf,
    },

    /// The compiler finished but its output could not be read
    #[error("Failed to read output {}: {}", path.display(), source)]
    ArtifactReadFailed {
        /// Expected artifact location
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Directory left behind for postmortem, if any
    pub fn working_area(&self) -> Option<&Path> {
        match self {
            Self::WorkingAreaCreationFailed(_) => None,
            Self::CompilerInvocationFailed { log_path } => log_path.parent(),
            Self::ArtifactReadFailed { path, .. } => path.parent(),
        }
    }

    /// Compiler log to read for diagnostics, if any
    pub fn log_path(&self) -> Option<PathBuf> {
        match self {
            Self::WorkingAreaCreationFailed(_) => None,
            Self::CompilerInvocationFailed { log_path } => Some(log_path.clone()),
            Self::ArtifactReadFailed { .. } => self
                .working_area()
                .map(|dir| dir.join(crate::working_area::LOG_FILE)),
        }
    }
}

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read config {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::Settings`]
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_error_points_at_log() {
        let err = RenderError::CompilerInvocationFailed {
            log_path: PathBuf::from("/tmp/texpass-abc/texpass.log"),
        };
        assert_eq!(
            err.to_string(),
            "Compiler error. Check /tmp/texpass-abc/texpass.log"
        );
        assert_eq!(err.working_area(), Some(Path::new("/tmp/texpass-abc")));
    }

    #[test]
    fn test_artifact_error_reports_log() {
        let err = RenderError::ArtifactReadFailed {
            path: PathBuf::from("/tmp/texpass-abc/texpass.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/tmp/texpass-abc/texpass.pdf"));
        assert_eq!(
            err.log_path(),
            Some(PathBuf::from("/tmp/texpass-abc/texpass.log"))
        );
    }

    #[test]
    fn test_creation_error_has_no_working_area() {
        let err = RenderError::WorkingAreaCreationFailed(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(err.working_area().is_none());
        assert!(err.log_path().is_none());
    }
}
