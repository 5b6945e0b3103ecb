//! File provider push notifications.

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::{Expiration, Priority};
use crate::error::PayloadError;

/// A push telling the file provider extension that remote content changed.
///
/// Like background pushes, these are pinned to the power-considerate
/// priority; request assembly emits `apns-priority: 5` no matter what
/// [`priority`](Self::priority) is set to.
#[derive(Debug, Clone)]
pub struct FileProviderNotification {
    /// Destination topic: `{app_id}.pushkit.fileprovider`.
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

impl FileProviderNotification {
    /// New file provider notification with an explicit topic.
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

    /// New file provider notification for an app bundle ID, deriving the
    /// `.pushkit.fileprovider` topic suffix.
    #[must_use]
    pub fn for_app(app_id: &str) -> Self {
        Self::new(format!("{app_id}.pushkit.fileprovider"))
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
