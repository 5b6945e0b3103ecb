//! Widget timeline reload push notifications.

use serde_json::{Value, json};
use uuid::Uuid;

use super::Priority;

/// A push asking the system to reload the app's widget timelines.
///
/// Carries no user payload and no expiration; the body is the bare control
/// block with the content-changed flag.
#[derive(Debug, Clone)]
pub struct WidgetsNotification {
    /// Destination topic: `{app_id}.push-type.widgets`.
    pub topic: String,
    /// Client-supplied correlation identifier.
    pub apns_id: Option<Uuid>,
    /// Requested delivery priority.
    pub priority: Option<Priority>,
    /// Collapse identifier for superseding earlier notifications.
    pub collapse_id: Option<String>,
}

impl WidgetsNotification {
    /// New widgets notification with an explicit topic.
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            apns_id: None,
            priority: None,
            collapse_id: None,
        }
    }

    /// New widgets notification for an app bundle ID, deriving the
    /// `.push-type.widgets` topic suffix.
    #[must_use]
    pub fn for_app(app_id: &str) -> Self {
        Self::new(format!("{app_id}.push-type.widgets"))
    }

    pub(crate) fn control_block(&self) -> Value {
        json!({ "content-changed": 1 })
    }
}
