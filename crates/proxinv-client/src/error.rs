//! Error types for the Proxmox client

use proxinv_api::ConfigError;
use thiserror::Error;

/// Errors that can occur when talking to the Proxmox API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection failure, timeout, or failure while reading the body
    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    /// The caller cancelled the request while it was in flight
    #[error("request cancelled")]
    Cancelled,

    /// API answered with a status outside 200-399
    #[error("unexpected status code: {status}")]
    Protocol {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        message: String,
    },

    /// Response body is not the expected JSON shape
    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),

    /// Invalid base URL
    #[error("invalid URL")]
    Url(#[from] url::ParseError),

    /// Credential material cannot be sent as a header
    #[error("invalid authorization header")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Missing credentials
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Network level failure, including cancellation
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Cancelled)
    }

    /// HTTP status of a protocol error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
