//! Error types for the siteenv library.
//!
//! This module provides the error hierarchy for configuration resolution,
//! using `thiserror` for ergonomic error handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a siteenv error.
///
/// # Examples
///
/// ```
/// use siteenv::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("database".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Where the resolution is running.
///
/// The default-site guard reports a denial differently depending on whether
/// an operator is at a terminal or a request is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// A command-line invocation.
    #[default]
    Cli,
    /// An HTTP request being served.
    Server,
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "cli"),
            Self::Server => write!(f, "server"),
        }
    }
}

/// The main error type for the siteenv library.
#[derive(Debug, Error)]
pub enum Error {
    /// The environment name variable is absent.
    #[error("environment name is not defined: set APP_ENV (e.g. dev, staging, prod)")]
    MissingEnvironmentName,

    /// A required environment variable is absent.
    #[error("required environment variable {name} is not defined")]
    MissingVariable {
        /// The variable name.
        name: String,
    },

    /// A URL could not be parsed.
    #[error("URL \"{url}\" could not be parsed: {reason}")]
    MalformedUrl {
        /// The offending URL.
        url: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The primary datastore URL could not be parsed.
    #[error("DSN \"{url}\" could not be parsed: {reason}")]
    MalformedPrimaryDatastoreUrl {
        /// The offending URL.
        url: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The default-site guard was tripped.
    #[error("{}", denial_message(*.context))]
    ConfigurationDenied {
        /// The site name that was denied.
        site: String,
        /// Where the resolution was running.
        context: ExecutionContext,
    },

    /// A database name could not be derived.
    #[error("database name could not be computed from {url}")]
    UnresolvableDatabaseName {
        /// The datastore URL the name was derived from.
        url: String,
    },

    /// A Host header did not match any trusted host pattern.
    #[error("host \"{host}\" does not match any trusted host pattern")]
    UntrustedHost {
        /// The rejected host.
        host: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A `.env` file could not be loaded.
    #[error("failed to load environment file {}: {reason}", path.display())]
    EnvFile {
        /// The file being loaded.
        path: PathBuf,
        /// The reason loading failed.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

fn denial_message(context: ExecutionContext) -> &'static str {
    match context {
        ExecutionContext::Cli => {
            "the \"default\" site in this multi-site install is not allowed; \
             select a site explicitly (e.g. `siteenv --site <site>`)"
        }
        ExecutionContext::Server => "Unauthorized",
    }
}

impl Error {
    /// Check if error is a tripped default-site guard.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteenv::{Error, ExecutionContext};
    ///
    /// let err = Error::ConfigurationDenied {
    ///     site: "default".to_string(),
    ///     context: ExecutionContext::Cli,
    /// };
    /// assert!(err.is_denied());
    /// ```
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::ConfigurationDenied { .. })
    }

    /// HTTP status a server entry point should answer with.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteenv::{Error, ExecutionContext};
    ///
    /// let err = Error::ConfigurationDenied {
    ///     site: "default".to_string(),
    ///     context: ExecutionContext::Server,
    /// };
    /// assert_eq!(err.http_status(), 401);
    /// assert_eq!(Error::MissingEnvironmentName.http_status(), 500);
    /// ```
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ConfigurationDenied { .. } => 401,
            Self::UntrustedHost { .. } => 400,
            _ => 500,
        }
    }
}
