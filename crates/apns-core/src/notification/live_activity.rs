//! Live Activity update push notifications.

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::{Expiration, Priority};
use crate::error::PayloadError;

/// What the Live Activity should do with this update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveActivityEvent {
    /// Update the activity's content state.
    Update,
    /// End the activity, optionally at a dismissal date.
    End,
}

impl LiveActivityEvent {
    /// The `event` field value in the control block.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::End => "end",
        }
    }
}

/// A push updating or ending a Live Activity.
///
/// The dynamic data travels in the `content-state` field of the control
/// block rather than as a root-level user payload.
#[derive(Debug, Clone)]
pub struct LiveActivityNotification {
    /// Destination topic: `{app_id}.push-type.liveactivity`.
    pub topic: String,
    /// Client-supplied correlation identifier.
    pub apns_id: Option<Uuid>,
    /// Delivery retry policy hint.
    pub expiration: Expiration,
    /// Requested delivery priority.
    pub priority: Option<Priority>,
    /// Collapse identifier for superseding earlier notifications.
    pub collapse_id: Option<String>,
    /// Update or end event.
    pub event: LiveActivityEvent,
    /// The activity's new content state.
    pub content_state: Value,
    /// When this state was produced (epoch seconds); the device ignores
    /// updates older than the one it already shows.
    pub timestamp: i64,
    /// For end events, when the ended activity leaves the lock screen
    /// (epoch seconds).
    pub dismissal_date: Option<i64>,
}

impl LiveActivityNotification {
    /// New Live Activity notification with an explicit topic.
    pub fn new<S: Serialize>(
        topic: impl Into<String>,
        event: LiveActivityEvent,
        content_state: &S,
        timestamp: i64,
    ) -> Result<Self, PayloadError> {
        Ok(Self {
            topic: topic.into(),
            apns_id: None,
            expiration: Expiration::Immediately,
            priority: None,
            collapse_id: None,
            event,
            content_state: serde_json::to_value(content_state)?,
            timestamp,
            dismissal_date: None,
        })
    }

    /// New Live Activity notification for an app bundle ID, deriving the
    /// `.push-type.liveactivity` topic suffix.
    pub fn for_app<S: Serialize>(
        app_id: &str,
        event: LiveActivityEvent,
        content_state: &S,
        timestamp: i64,
    ) -> Result<Self, PayloadError> {
        Self::new(Self::topic_for_app(app_id), event, content_state, timestamp)
    }

    /// The derived topic for an app bundle ID.
    #[must_use]
    pub fn topic_for_app(app_id: &str) -> String {
        format!("{app_id}.push-type.liveactivity")
    }

    pub(crate) fn control_block(&self) -> Value {
        let mut aps = json!({
            "timestamp": self.timestamp,
            "event": self.event.as_str(),
            "content-state": self.content_state,
        });
        if let Some(dismissal_date) = self.dismissal_date {
            aps["dismissal-date"] = json!(dismissal_date);
        }
        aps
    }
}
