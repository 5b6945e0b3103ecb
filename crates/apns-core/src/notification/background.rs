//! Silent background refresh notifications.

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::{Expiration, Priority};
use crate::error::PayloadError;

/// A silent notification waking the app for a content refresh.
///
/// The gateway requires these to be delivered at the power-considerate
/// priority; request assembly emits `apns-priority: 5` no matter what
/// [`priority`](Self::priority) is set to.
#[derive(Debug, Clone)]
pub struct BackgroundNotification {
    /// Destination topic, typically the app bundle ID.
    pub topic: String,
    /// Client-supplied correlation identifier.
    pub apns_id: Option<Uuid>,
    /// Delivery retry policy hint.
    pub expiration: Expiration,
    /// Requested priority; ignored at assembly, see the type docs.
    pub priority: Option<Priority>,
    /// Collapse identifier for superseding earlier notifications.
    pub collapse_id: Option<String>,
    /// Custom payload fields encoded at the document root.
    pub payload: Option<Value>,
}

impl BackgroundNotification {
    /// New background notification for the given topic.
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

    /// Attach a custom payload, serialized to the document root.
    pub fn with_payload<P: Serialize>(mut self, payload: &P) -> Result<Self, PayloadError> {
        self.payload = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    pub(crate) fn control_block(&self) -> Value {
        json!({ "content-available": 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_block_is_content_available() {
        let notification = BackgroundNotification::new("com.test.app");
        assert_eq!(
            notification.control_block(),
            json!({ "content-available": 1 })
        );
    }
}
