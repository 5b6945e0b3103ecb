//! Watch complication push notifications.

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::{Expiration, Priority};
use crate::error::PayloadError;

/// A push refreshing a watch complication.
#[derive(Debug, Clone)]
pub struct ComplicationNotification {
    /// Destination topic: `{app_id}.complication`.
    pub topic: String,
    /// Client-supplied correlation identifier.
    pub apns_id: Option<Uuid>,
    /// Delivery retry policy hint.
    pub expiration: Expiration,
    /// Requested delivery priority.
    pub priority: Option<Priority>,
    /// Collapse identifier for superseding earlier notifications.
    pub collapse_id: Option<String>,
    /// Custom payload fields encoded at the document root.
    pub payload: Option<Value>,
}

impl ComplicationNotification {
    /// New complication notification with an explicit topic.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            apns_id: None,
            expiration: Expiration::Immediately,
            priority: None,
            collapse_id: None,
            payload: None,
        }
    }

    /// New complication notification for an app bundle ID, deriving the
    /// `.complication` topic suffix.
    #[must_use]
    pub fn for_app(app_id: &str) -> Self {
        Self::new(format!("{app_id}.complication"))
    }

    /// Attach a custom payload, serialized to the document root.
    pub fn with_payload<P: Serialize>(mut self, payload: &P) -> Result<Self, PayloadError> {
        self.payload = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    pub(crate) fn control_block(&self) -> Value {
        json!({ "content-available": 1 })
    }
}
