//! Error types for Spire core.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving report parameters.
#[derive(Debug, Error)]
pub enum Error {
    /// A report month string is not in `yyyy-mm` form.
    #[error("Invalid report month '{input}': expected yyyy-mm")]
    InvalidMonth {
        /// The rejected input.
        input: String,
    },

    /// A filter threshold is outside its allowed range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}
