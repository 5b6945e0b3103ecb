//! Caller-controlled raw notifications.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{Expiration, Priority};
use crate::error::PayloadError;

/// An escape hatch for push types or payload shapes this crate does not
/// model: the caller supplies the push type string and the body verbatim.
///
/// No control block is written; the payload is the entire document, so the
/// caller is responsible for any `aps` content the gateway expects.
#[derive(Debug, Clone)]
pub struct RawNotification {
    /// The `apns-push-type` header value.
    pub push_type: String,
    /// Destination topic.
    pub topic: String,
    /// Client-supplied correlation identifier.
    pub apns_id: Option<Uuid>,
    /// Delivery retry policy hint.
    pub expiration: Expiration,
    /// Requested delivery priority.
    pub priority: Option<Priority>,
    /// Collapse identifier for superseding earlier notifications.
    pub collapse_id: Option<String>,
    /// The complete body document.
    pub payload: Value,
}

impl RawNotification {
    /// New raw notification with the given push type, topic, and body.
    pub fn new<P: Serialize>(
        push_type: impl Into<String>,
        topic: impl Into<String>,
        payload: &P,
    ) -> Result<Self, PayloadError> {
        Ok(Self {
            push_type: push_type.into(),
            topic: topic.into(),
            apns_id: None,
            expiration: Expiration::Immediately,
            priority: None,
            collapse_id: None,
            payload: serde_json::to_value(payload)?,
        })
    }
}
