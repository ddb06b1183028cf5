//! Error types for the Stockboard plugin.
//!
//! This module defines the centralized error type [`StockboardError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Two variants matter to the user: [`StockboardError::Api`] (the server answered with
//! a non-success status) and [`StockboardError::Network`] (the request never produced a
//! usable answer). Both end up as a single alert banner; the rest are plumbing failures
//! that are logged.

use thiserror::Error;

/// The main error type for Stockboard plugin operations.
///
/// # Examples
///
/// ```
/// use stockboard::domain::StockboardError;
///
/// let err = StockboardError::Api { status: 400, message: "Descrição é obrigatória".to_string() };
/// assert_eq!(err.to_string(), "Descrição é obrigatória");
/// assert!(err.is_api());
/// ```
#[derive(Debug, Error)]
pub enum StockboardError {
    /// The server answered with a non-2xx status.
    ///
    /// The message is taken verbatim from the `error` field of the response body.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Message reported by the server.
        message: String,
    },

    /// The request could not complete or the response was not JSON.
    #[error("{0}")]
    Network(String),

    /// A successful response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// A form value was rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// A request payload could not be serialized.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl StockboardError {
    /// Returns `true` when the server itself rejected the request.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

/// A specialized `Result` type for Stockboard operations.
pub type Result<T> = std::result::Result<T, StockboardError>;
