//! Caller-facing error taxonomy of the service layer.

use thiserror::Error;

use stockroom_core::DomainError;

/// A repository call failed (network/backend).
///
/// Surfaced verbatim to the caller; the service never retries and never
/// mutates local state on the way out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Union of everything a service operation can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
