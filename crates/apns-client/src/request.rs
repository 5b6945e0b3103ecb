//! Request assembly: notification + device token + bearer token → request.
//!
//! Pure transformation, no I/O. The header matrix is deterministic per
//! variant; the body comes from the notification's wire encoding.

use apns_core::{Notification, Priority};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::ClientError;

/// A fully formed protocol request, ready for a transport.
///
/// Constructed fresh for every send and never cached; the bearer token it
/// carries is a snapshot of the cache at assembly time.
#[derive(Debug, Clone)]
pub struct AssembledRequest {
    /// HTTP method (always POST for deliveries).
    pub method: Method,
    /// Request path: `/3/device/{device_token}`.
    pub path: String,
    /// Protocol headers including authorization.
    pub headers: HeaderMap,
    /// Encoded JSON body.
    pub body: Vec<u8>,
}

/// Errors producing a request from a notification.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// The notification topic is empty.
    #[error("notification topic must not be empty")]
    EmptyTopic,
    /// The destination device token is empty.
    #[error("device token must not be empty")]
    EmptyDeviceToken,
    /// A computed header value is not valid HTTP header text.
    #[error("invalid value for header {header}: {reason}")]
    InvalidHeader {
        /// Header name.
        header: &'static str,
        /// Error description.
        reason: String,
    },
}

/// Assemble a protocol request.
///
/// Background and file-provider notifications always emit
/// `apns-priority: 5` regardless of any caller-set priority; the gateway
/// rejects higher priorities for those push types.
pub fn assemble(
    notification: &Notification,
    device_token: &str,
    bearer_token: &str,
) -> Result<AssembledRequest, ClientError> {
    if notification.topic().is_empty() {
        return Err(AssemblyError::EmptyTopic.into());
    }
    if device_token.is_empty() {
        return Err(AssemblyError::EmptyDeviceToken.into());
    }

    let body = notification.encode()?;

    let mut headers = HeaderMap::new();
    insert(&mut headers, "apns-topic", notification.topic())?;
    insert(&mut headers, "apns-push-type", notification.push_type())?;
    if let Some(apns_id) = notification.apns_id() {
        insert(&mut headers, "apns-id", &apns_id.to_string())?;
    }
    if let Some(value) = notification.expiration().and_then(|e| e.header_value()) {
        insert(&mut headers, "apns-expiration", &value)?;
    }
    if let Some(priority) = effective_priority(notification) {
        insert(&mut headers, "apns-priority", priority.header_value())?;
    }
    if let Some(collapse_id) = notification.collapse_id() {
        insert(&mut headers, "apns-collapse-id", collapse_id)?;
    }
    let authorization = HeaderValue::from_str(&format!("bearer {bearer_token}")).map_err(|e| {
        AssemblyError::InvalidHeader {
            header: "authorization",
            reason: e.to_string(),
        }
    })?;
    let _ = headers.insert(AUTHORIZATION, authorization);

    Ok(AssembledRequest {
        method: Method::POST,
        path: format!("/3/device/{device_token}"),
        headers,
        body,
    })
}

/// The priority actually sent, after applying the fixed-priority rule.
fn effective_priority(notification: &Notification) -> Option<Priority> {
    match notification {
        Notification::Background(_) | Notification::FileProvider(_) => {
            Some(Priority::ConsideringDevicePower)
        }
        _ => notification.priority(),
    }
}

fn insert(
    headers: &mut HeaderMap,
    name: &'static str,
    value: &str,
) -> Result<(), AssemblyError> {
    let value = HeaderValue::from_str(value).map_err(|e| AssemblyError::InvalidHeader {
        header: name,
        reason: e.to_string(),
    })?;
    let _ = headers.insert(name, value);
    Ok(())
}
