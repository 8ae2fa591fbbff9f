//! Error types for the DDNS system
//!
//! Every fatal condition of a run is one variant of [`Error`]. Remote-call
//! errors carry the operation name so a failure can be diagnosed from the log
//! line alone.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response
    #[error("{operation} failed: {message}")]
    Transport {
        /// Remote operation (e.g. "ping")
        operation: &'static str,
        /// Underlying transport error
        message: String,
    },

    /// The provider answered with a status other than 200
    #[error("{operation} failed: response status {status}. Body: {body}")]
    HttpStatus {
        /// Remote operation
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response body could not be decoded
    #[error("{operation} failed: cannot decode response: {message}")]
    Decode {
        /// Remote operation
        operation: &'static str,
        /// Decoder error
        message: String,
    },

    /// The provider reported a non-success status in the response body
    #[error("{operation} failed: API status {status:?}: {message}")]
    Api {
        /// Remote operation
        operation: &'static str,
        /// Value of the `status` field
        status: String,
        /// Value of the `message` field, if any
        message: String,
    },

    /// Local name resolution failed
    #[error("Failed to look up {host:?}: {message}")]
    Resolve {
        /// Host name that was looked up
        host: String,
        /// Resolver error
        message: String,
    },

    /// A value that should be an IPv4 address is not one
    #[error("Not a valid IPv4 address: {0}")]
    InvalidAddress(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The overall deadline of a run expired
    #[error("Deadline of {0:?} exceeded")]
    Timeout(Duration),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error for `operation`
    pub fn transport(operation: &'static str, msg: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: msg.into(),
        }
    }

    /// Create a decode error for `operation`
    pub fn decode(operation: &'static str, msg: impl Into<String>) -> Self {
        Self::Decode {
            operation,
            message: msg.into(),
        }
    }

    /// Create a resolver error
    pub fn resolve(host: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Resolve {
            host: host.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error comes from loading or validating configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
