//! CLI error type.

use std::fmt;

use pakforge::export::ExportError;
use pakforge::store::StoreError;
use pakforge::version::ParseError;

/// Errors surfaced to the command-line user.
#[derive(Debug)]
pub enum CliError {
    /// Configuration is missing or invalid.
    Config(String),

    /// A version label failed to parse.
    Parse(ParseError),

    /// Package store operation failed.
    Store(StoreError),

    /// Export operation failed.
    Export(ExportError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "configuration error: {}", msg),
            CliError::Parse(e) => write!(f, "{}", e),
            CliError::Store(e) => write!(f, "{}", e),
            CliError::Export(e) => match e {
                // The overwrite guard is user-recoverable; point at the way out.
                ExportError::AlreadyExists(path) => {
                    write!(
                        f,
                        "package already exists at {} (re-run with --force to replace)",
                        path.display()
                    )
                }
                other => write!(f, "{}", other),
            },
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Parse(e) => Some(e),
            CliError::Store(e) => Some(e),
            CliError::Export(e) => Some(e),
        }
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}
