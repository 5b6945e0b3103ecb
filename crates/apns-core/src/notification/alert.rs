//! User-visible alert notifications.

use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::{Expiration, Priority};
use crate::error::PayloadError;

/// The user-visible alert content.
#[derive(Debug, Clone, Default)]
pub struct Alert {
    /// Short title line.
    pub title: Option<String>,
    /// Secondary line under the title.
    pub subtitle: Option<String>,
    /// Message body.
    pub body: Option<String>,
}

impl Alert {
    /// Alert with a title and a body, the common case.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            subtitle: None,
            body: Some(body.into()),
        }
    }
}

/// A notification the user sees: banner, sound, badge.
#[derive(Debug, Clone)]
pub struct AlertNotification {
    /// Destination topic, typically the app bundle ID.
    pub topic: String,
    /// Client-supplied correlation identifier.
    pub apns_id: Option<Uuid>,
    /// Delivery retry policy hint.
    pub expiration: Expiration,
    /// Requested delivery priority.
    pub priority: Option<Priority>,
    /// Collapse identifier for superseding earlier notifications.
    pub collapse_id: Option<String>,
    /// Alert content.
    pub alert: Alert,
    /// App icon badge count.
    pub badge: Option<u32>,
    /// Sound name (e.g. `"default"`).
    pub sound: Option<String>,
    /// Thread ID for notification grouping.
    pub thread_id: Option<String>,
    /// Category identifier for actionable notifications.
    pub category: Option<String>,
    /// Whether a notification service extension may rewrite the content.
    pub mutable_content: bool,
    /// Custom payload fields encoded at the document root.
    pub payload: Option<Value>,
}

impl AlertNotification {
    /// New alert notification for the given topic.
    #[must_use]
    pub fn new(topic: impl Into<String>, alert: Alert) -> Self {
        Self {
            topic: topic.into(),
            apns_id: None,
            expiration: Expiration::Immediately,
            priority: None,
            collapse_id: None,
            alert,
            badge: None,
            sound: None,
            thread_id: None,
            category: None,
            mutable_content: false,
            payload: None,
        }
    }

    /// Attach a custom payload, serialized to the document root.
    pub fn with_payload<P: Serialize>(mut self, payload: &P) -> Result<Self, PayloadError> {
        self.payload = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    pub(crate) fn control_block(&self) -> Value {
        let mut alert = json!({});
        if let Some(ref title) = self.alert.title {
            alert["title"] = json!(title);
        }
        if let Some(ref subtitle) = self.alert.subtitle {
            alert["subtitle"] = json!(subtitle);
        }
        if let Some(ref body) = self.alert.body {
            alert["body"] = json!(body);
        }

        let mut aps = json!({ "alert": alert });
        if let Some(badge) = self.badge {
            aps["badge"] = json!(badge);
        }
        if let Some(ref sound) = self.sound {
            aps["sound"] = json!(sound);
        }
        if let Some(ref thread_id) = self.thread_id {
            aps["thread-id"] = json!(thread_id);
        }
        if let Some(ref category) = self.category {
            aps["category"] = json!(category);
        }
        if self.mutable_content {
            aps["mutable-content"] = json!(1);
        }
        aps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_block_full() {
        let mut notification = AlertNotification::new(
            "com.test.app",
            Alert {
                title: Some("Test".to_string()),
                subtitle: Some("Sub".to_string()),
                body: Some("Hello".to_string()),
            },
        );
        notification.badge = Some(1);
        notification.sound = Some("default".to_string());
        notification.thread_id = Some("thread-1".to_string());
        notification.category = Some("MESSAGE".to_string());
        notification.mutable_content = true;

        let aps = notification.control_block();
        assert_eq!(aps["alert"]["title"], "Test");
        assert_eq!(aps["alert"]["subtitle"], "Sub");
        assert_eq!(aps["alert"]["body"], "Hello");
        assert_eq!(aps["badge"], 1);
        assert_eq!(aps["sound"], "default");
        assert_eq!(aps["thread-id"], "thread-1");
        assert_eq!(aps["category"], "MESSAGE");
        assert_eq!(aps["mutable-content"], 1);
    }

    #[test]
    fn control_block_minimal() {
        let notification = AlertNotification::new("com.test.app", Alert::new("T", "B"));
        let aps = notification.control_block();
        assert_eq!(aps["alert"]["title"], "T");
        assert_eq!(aps["alert"]["body"], "B");
        assert!(aps["alert"].get("subtitle").is_none());
        assert!(aps.get("badge").is_none());
        assert!(aps.get("sound").is_none());
        assert!(aps.get("mutable-content").is_none());
    }

    #[test]
    fn with_payload_accepts_struct() {
        #[derive(Serialize)]
        struct Extra {
            session_id: String,
        }

        let notification = AlertNotification::new("com.test.app", Alert::new("T", "B"))
            .with_payload(&Extra {
                session_id: "sess_1".to_string(),
            })
            .unwrap();
        assert_eq!(notification.payload.unwrap()["session_id"], "sess_1");
    }
}
