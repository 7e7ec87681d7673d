//! Error types for the enclave transport.
//!
//! # Design
//! Network failures and non-2xx responses share the `Connection` variant so
//! callers see one "could not talk to the enclave" kind. Network failures
//! carry status `0` and the underlying error message as `text`. `Decode` is
//! kept separate: the exchange itself succeeded but the payload did not have
//! the expected shape.

use thiserror::Error;

/// Status reported in `TransportError::Connection` when no HTTP response was
/// received at all.
pub const NO_STATUS: u16 = 0;

/// Errors returned by `EnclaveTransport` operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never completed, or the enclave answered with a non-2xx
    /// status.
    #[error("Invalid response received from enclave: {status} {text}")]
    Connection { status: u16, text: String },

    /// A 2xx response body could not be deserialized into the expected type.
    #[error("failed to decode enclave response: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode enclave request: {0}")]
    Encode(String),
}

impl TransportError {
    /// Build a `Connection` error for a failure below the HTTP layer.
    pub fn network(err: impl std::fmt::Display) -> Self {
        TransportError::Connection {
            status: NO_STATUS,
            text: err.to_string(),
        }
    }

    /// HTTP status attached to the error, if any response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Connection { status, .. } if *status != NO_STATUS => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading `EnclaveConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid enclave port: {0}")]
    InvalidPort(String),

    #[error("invalid enclave timeout: {0}")]
    InvalidTimeout(String),
}
