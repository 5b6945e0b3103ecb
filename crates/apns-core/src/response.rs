//! Classification of gateway responses.
//!
//! A 200 becomes a [`Delivered`] confirmation carrying the gateway-echoed
//! `apns-id`. Anything else is parsed as the gateway's JSON error body and
//! mapped onto the [`ErrorReason`] taxonomy; only a body that is not valid
//! JSON is reported as malformed.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ErrorReason, ResponseError};

/// Confirmation of an accepted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    /// The notification's correlation identifier: the gateway-echoed
    /// `apns-id` header, or the submitted one when the echo is absent.
    pub apns_id: Option<Uuid>,
}

/// The gateway's JSON error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    reason: String,
    timestamp: Option<i64>,
}

/// Classify a raw gateway response.
///
/// `apns_id` is the echoed response header; `submitted_id` is the ID the
/// request carried, used as the fallback correlation ID on success.
pub fn interpret(
    status: u16,
    apns_id: Option<&str>,
    body: &[u8],
    submitted_id: Option<Uuid>,
) -> Result<Delivered, ResponseError> {
    if status == 200 {
        let echoed = apns_id.and_then(|value| Uuid::parse_str(value).ok());
        return Ok(Delivered {
            apns_id: echoed.or(submitted_id),
        });
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(error_body) => Err(ResponseError::Gateway {
            status,
            reason: ErrorReason::from_reason(&error_body.reason),
            timestamp: error_body.timestamp,
        }),
        Err(e) => Err(ResponseError::Malformed {
            status,
            message: e.to_string(),
        }),
    }
}
