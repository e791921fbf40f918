//! Configuration system error types.
//!
//! Domain-specific errors for runtime context loading, configuration
//! decoding and synthesizer identity resolution.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
///
/// These errors occur while reading the runtime context, decoding rendered
/// configuration documents or resolving the deployment identity. All of them
/// abort a launch before any stack unit is declared.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Context file not found: {path}")]
    ContextFileNotFound { path: String },

    #[error("Failed to access context file: {path} - {reason}")]
    ContextFileAccess { path: String, reason: String },

    #[error("Failed to parse context: {reason}")]
    ContextParse { reason: String },

    #[error("Required context value missing: {key}")]
    ContextMissing { key: String },

    #[error("Invalid context value for '{key}': {reason}")]
    ContextInvalid { key: String, reason: String },

    /// A rendered document could not be decoded into the configuration records.
    ///
    /// `path` is the dotted field path of the offending value (for example
    /// `common.id` or `release.eks.loggingTypes`). It is empty when the
    /// document as a whole is malformed.
    #[error("Failed to decode configuration{}: {reason}", describe_path(.path))]
    Decode { path: String, reason: String },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Failed to resolve synthesizer identity: {field} - {reason}")]
    IdentityResolution { field: String, reason: String },

    #[error("Failed to prepare template substitutions: {reason}")]
    Substitution { reason: String },
}

fn describe_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at '{}'", path)
    }
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
