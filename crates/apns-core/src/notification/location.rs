//! Location query push notifications.

use serde_json::{Value, json};
use uuid::Uuid;

use super::Priority;

/// A push asking the device for its current location.
///
/// Carries no user payload and no expiration; the body is the bare control
/// block.
#[derive(Debug, Clone)]
pub struct LocationNotification {
    /// Destination topic: `{app_id}.location-query`.
    pub topic: String,
    /// Client-supplied correlation identifier.
    pub apns_id: Option<Uuid>,
    /// Requested delivery priority.
    pub priority: Option<Priority>,
    /// Collapse identifier for superseding earlier notifications.
    pub collapse_id: Option<String>,
}

impl LocationNotification {
    /// New location notification with an explicit topic.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            apns_id: None,
            priority: None,
            collapse_id: None,
        }
    }

    /// New location notification for an app bundle ID, deriving the
    /// `.location-query` topic suffix.
    #[must_use]
    pub fn for_app(app_id: &str) -> Self {
        Self::new(format!("{app_id}.location-query"))
    }

    pub(crate) fn control_block(&self) -> Value {
        json!({})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_bare_control_block() {
        let notification = LocationNotification::for_app("com.example.app");
        assert_eq!(notification.control_block(), json!({}));
    }
}
