//! Client-level error taxonomy.
//!
//! One umbrella enum over the per-concern errors so callers match on a
//! single type at the send boundary. Nothing here is retried internally;
//! retry policy belongs to whatever orchestrates the client.

use apns_core::{ErrorReason, PayloadError, ResponseError};

use crate::request::AssemblyError;
use crate::signer::SigningError;
use crate::transport::TransportError;

/// Everything that can go wrong delivering one notification.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Key material was invalid or the signing primitive failed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The notification payload could not be encoded.
    #[error(transparent)]
    Payload(PayloadError),

    /// The notification was missing a required field or produced an
    /// invalid header.
    #[error(transparent)]
    Assembly(AssemblyError),

    /// The transport failed below the protocol layer.
    #[error(transparent)]
    Transport(TransportError),

    /// The gateway rejected the notification.
    #[error("gateway rejected notification ({status}): {reason}")]
    Gateway {
        /// HTTP status code of the rejection.
        status: u16,
        /// Classified rejection reason; unrecognized reasons keep the raw
        /// string.
        reason: ErrorReason,
        /// Last moment the device token was valid, for
        /// `Unregistered`-class rejections.
        timestamp: Option<i64>,
    },

    /// The gateway response body was not valid JSON.
    #[error("malformed gateway response ({status}): {message}")]
    MalformedResponse {
        /// HTTP status code of the response.
        status: u16,
        /// Parse failure description.
        message: String,
    },

    /// The per-send deadline elapsed before a response was obtained.
    #[error("deadline elapsed before the gateway responded")]
    Timeout,
}

impl From<PayloadError> for ClientError {
    fn from(error: PayloadError) -> Self {
        Self::Payload(error)
    }
}

impl From<AssemblyError> for ClientError {
    fn from(error: AssemblyError) -> Self {
        Self::Assembly(error)
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout => Self::Timeout,
            other => Self::Transport(other),
        }
    }
}

impl From<ResponseError> for ClientError {
    fn from(error: ResponseError) -> Self {
        match error {
            ResponseError::Gateway {
                status,
                reason,
                timestamp,
            } => Self::Gateway {
                status,
                reason,
                timestamp,
            },
            ResponseError::Malformed { status, message } => {
                Self::MalformedResponse { status, message }
            }
        }
    }
}
