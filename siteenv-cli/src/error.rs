//! CLI-specific error types with exit codes.
//!
//! Library errors are wrapped so each failure class maps to a stable exit
//! code scripts can branch on.

use siteenv::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Output could not be rendered.
    Config(String),

    /// Semantic failure (e.g., host rejected, tree invalid) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (untrusted host, invalid trees)
    /// - 2: Missing environment variable
    /// - 3: Default site denied in a multi-site install
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 7: Configuration error (malformed URL, override or `.env` file)
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::UntrustedHost { .. } => 1,
                LibError::MissingEnvironmentName | LibError::MissingVariable { .. } => 2,
                LibError::ConfigurationDenied { .. } => 3,
                LibError::MalformedUrl { .. }
                | LibError::MalformedPrimaryDatastoreUrl { .. }
                | LibError::UnresolvableDatabaseName { .. }
                | LibError::InvalidPath { .. }
                | LibError::EnvFile { .. }
                | LibError::Validation { .. } => 7,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
