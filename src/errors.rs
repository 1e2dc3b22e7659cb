/*!
 * Error types for the trackpick application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when running the external container tools
#[derive(Error, Debug)]
pub enum ToolError {
    /// A required executable could not be located on PATH
    #[error("Required tool not found: {0}")]
    NotFound(String),

    /// The tool could not be spawned at all
    #[error("Failed to execute {tool}: {message}")]
    ExecutionFailed {
        /// Tool name
        tool: String,
        /// Underlying spawn error
        message: String,
    },

    /// The tool ran but reported an error status
    #[error("{tool} exited with status {status}: {stderr}")]
    ToolFailed {
        /// Tool name
        tool: String,
        /// Process exit status (-1 when terminated by a signal)
        status: i32,
        /// Captured error output
        stderr: String,
    },

    /// The inspector output could not be parsed
    #[error("Failed to parse track structure: {0}")]
    ParseError(String),
}

/// Errors raised while loading or validating the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured language code is not a known ISO 639 code
    #[error("Invalid language code for {option}: {code}")]
    InvalidLanguage {
        /// Configuration key the code came from
        option: &'static str,
        /// The rejected code
        code: String,
    },

    /// No container extensions were configured
    #[error("At least one container file extension must be configured")]
    NoExtensions,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The external tools are missing, nothing can be processed
    #[error("Environment error: {0}")]
    Environment(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
