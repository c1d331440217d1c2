//! Error types for the export orchestrator.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::store::StoreError;
use crate::version::VersionSpec;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur during a package export.
///
/// All variants are recoverable conditions surfaced to the caller; none of
/// them leave the store in a state where "nothing happened" cannot be told
/// apart from "partially happened", since the only pre-success mutation is
/// idempotent directory creation.
#[derive(Debug)]
pub enum ExportError {
    /// Another export is already in flight on this orchestrator.
    Busy,

    /// The build tool executable is not present at the configured path.
    ToolNotFound(PathBuf),

    /// A required basis package has not been exported yet.
    MissingBasis {
        version: VersionSpec,
        expected: PathBuf,
    },

    /// The target artifact already exists and force was not set.
    AlreadyExists(PathBuf),

    /// The build tool reported failure.
    BuildToolFailed {
        status: Option<i32>,
        stderr: String,
    },

    /// Failed to relocate a quick-export artifact.
    RelocateFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// Store layout operation failed.
    Store(StoreError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Busy => {
                write!(f, "another export is already in flight")
            }
            ExportError::ToolNotFound(path) => {
                write!(f, "build tool executable not found: {}", path.display())
            }
            ExportError::MissingBasis { version, expected } => {
                write!(
                    f,
                    "basis package {} does not exist (expected {})",
                    version,
                    expected.display()
                )
            }
            ExportError::AlreadyExists(path) => {
                write!(f, "package already exists at {}", path.display())
            }
            ExportError::BuildToolFailed { status, stderr } => match status {
                Some(code) => write!(f, "build tool exited with status {}: {}", code, stderr),
                None => write!(f, "build tool terminated abnormally: {}", stderr),
            },
            ExportError::RelocateFailed { from, to, source } => {
                write!(
                    f,
                    "failed to move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            ExportError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::RelocateFailed { source, .. } => Some(source),
            ExportError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ExportError {
    fn from(e: StoreError) -> Self {
        ExportError::Store(e)
    }
}
