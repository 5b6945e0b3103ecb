//! Wire encoding of notification bodies.
//!
//! The document root holds the caller's custom fields; the reserved `aps`
//! key holds the variant's control block. The control block is written
//! after the user fields and replaces any colliding `aps` field wholesale:
//! the gateway reserves that key, so a user value there is discarded,
//! never merged.

use serde_json::{Map, Value};

use crate::error::PayloadError;

/// Reserved root key holding the control block.
const CONTROL_BLOCK_KEY: &str = "aps";

/// Encode user payload fields plus the control block into body bytes.
pub(crate) fn encode_body(
    payload: Option<&Value>,
    control_block: Value,
) -> Result<Vec<u8>, PayloadError> {
    let mut root = match payload {
        Some(Value::Object(fields)) => fields.clone(),
        Some(_) => return Err(PayloadError::NotAnObject),
        None => Map::new(),
    };
    let _ = root.insert(CONTROL_BLOCK_KEY.to_string(), control_block);
    Ok(serde_json::to_vec(&Value::Object(root))?)
}

/// Encode a caller-controlled body verbatim.
pub(crate) fn encode_raw(payload: &Value) -> Result<Vec<u8>, PayloadError> {
    Ok(serde_json::to_vec(payload)?)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::notification::{BackgroundNotification, Notification};

    fn decode(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn control_block_replaces_colliding_user_field() {
        let notification = Notification::from(
            BackgroundNotification::new("com.test.app")
                .with_payload(&json!({ "aps": "foo" }))
                .unwrap(),
        );
        let body = decode(&notification.encode().unwrap());
        // The user's "aps" value is discarded wholesale, not merged.
        assert_eq!(body, json!({ "aps": { "content-available": 1 } }));
    }

    #[test]
    fn user_fields_survive_next_to_control_block() {
        let notification = Notification::from(
            BackgroundNotification::new("com.test.app")
                .with_payload(&json!({ "foo": "bar" }))
                .unwrap(),
        );
        let body = decode(&notification.encode().unwrap());
        assert_eq!(
            body,
            json!({ "foo": "bar", "aps": { "content-available": 1 } })
        );
    }

    #[test]
    fn exactly_one_reserved_key_after_collision() {
        let notification = Notification::from(
            BackgroundNotification::new("com.test.app")
                .with_payload(&json!({ "aps": { "badge": 3 }, "other": 1 }))
                .unwrap(),
        );
        let body = decode(&notification.encode().unwrap());
        let root = body.as_object().unwrap();
        assert_eq!(
            root.keys().filter(|k| k.as_str() == "aps").count(),
            1,
            "reserved key must appear exactly once"
        );
        assert_eq!(root["aps"], json!({ "content-available": 1 }));
        assert_eq!(root["other"], 1);
    }

    #[test]
    fn encoding_is_byte_identical_across_calls() {
        let notification = Notification::from(
            BackgroundNotification::new("com.test.app")
                .with_payload(&json!({ "foo": "bar", "count": 2 }))
                .unwrap(),
        );
        assert_eq!(notification.encode().unwrap(), notification.encode().unwrap());
    }

    #[test]
    fn payload_less_body_is_control_block_only() {
        let notification = Notification::from(BackgroundNotification::new("com.test.app"));
        let body = decode(&notification.encode().unwrap());
        assert_eq!(body, json!({ "aps": { "content-available": 1 } }));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let mut background = BackgroundNotification::new("com.test.app");
        background.payload = Some(json!("just a string"));
        let result = Notification::from(background).encode();
        assert_matches!(result, Err(PayloadError::NotAnObject));
    }
}
