//! Payload encoding errors, response errors, and the gateway reason taxonomy.

use serde::{Deserialize, Serialize};

/// Errors producing the JSON body of a notification.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The user payload failed to serialize to JSON.
    #[error("failed to serialize notification payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The user payload serialized to something other than a JSON object.
    ///
    /// Custom payload fields live at the document root next to the `aps`
    /// control block, so only objects are representable.
    #[error("notification payload must serialize to a JSON object")]
    NotAnObject,
}

/// Errors classifying a gateway response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// The gateway rejected the notification with a recognized error body.
    #[error("gateway rejected notification ({status}): {reason}")]
    Gateway {
        /// HTTP status code of the rejection.
        status: u16,
        /// Classified rejection reason.
        reason: ErrorReason,
        /// Last moment the device token was valid, for `Unregistered`-class
        /// rejections (epoch milliseconds as reported by the gateway).
        timestamp: Option<i64>,
    },

    /// The response body was not valid JSON.
    #[error("malformed gateway response ({status}): {message}")]
    Malformed {
        /// HTTP status code of the response.
        status: u16,
        /// Parse failure description.
        message: String,
    },
}

/// The gateway's documented rejection reasons.
///
/// Matched by exact string against the `reason` field of the error body.
/// Reasons the gateway introduces after this list was written land in
/// [`ErrorReason::Other`] with the raw string preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorReason {
    /// The collapse identifier exceeds the maximum allowed size.
    BadCollapseId,
    /// The device token is invalid or malformed.
    BadDeviceToken,
    /// The `apns-expiration` value is bad.
    BadExpirationDate,
    /// The `apns-id` value is bad.
    BadMessageId,
    /// The `apns-priority` value is bad.
    BadPriority,
    /// The `apns-topic` value is bad.
    BadTopic,
    /// The device token does not match the specified topic.
    DeviceTokenNotForTopic,
    /// One or more headers were repeated.
    DuplicateHeaders,
    /// Idle timeout.
    IdleTimeout,
    /// The `apns-push-type` value is invalid.
    InvalidPushType,
    /// The device token is not specified in the request path.
    MissingDeviceToken,
    /// The `apns-topic` header of the request is not specified and is required.
    MissingTopic,
    /// The message payload is empty.
    PayloadEmpty,
    /// The message payload is too large.
    PayloadTooLarge,
    /// Pushing to this topic is not allowed.
    TopicDisallowed,
    /// The certificate is bad.
    BadCertificate,
    /// The client certificate is for the wrong environment.
    BadCertificateEnvironment,
    /// The provider token is stale and a new token should be generated.
    ExpiredProviderToken,
    /// The specified action is not allowed.
    Forbidden,
    /// The provider token is not valid, or the token signature cannot be verified.
    InvalidProviderToken,
    /// No provider certificate was used to connect and the authorization
    /// header is missing or no provider token is specified.
    MissingProviderToken,
    /// The request path value is bad.
    BadPath,
    /// The request method is not allowed.
    MethodNotAllowed,
    /// The device token has expired.
    ExpiredToken,
    /// The device token is inactive for the specified topic.
    Unregistered,
    /// The provider's authentication token is being updated too often.
    TooManyProviderTokenUpdates,
    /// Too many requests were made consecutively to the same device token.
    TooManyRequests,
    /// An internal server error occurred.
    InternalServerError,
    /// The service is unavailable.
    ServiceUnavailable,
    /// The server is shutting down.
    Shutdown,
    /// A reason string this crate does not recognize.
    Other(String),
}

impl ErrorReason {
    /// Classify a raw gateway reason string.
    #[must_use]
    pub fn from_reason(reason: &str) -> Self {
        match reason {
            "BadCollapseId" => Self::BadCollapseId,
            "BadDeviceToken" => Self::BadDeviceToken,
            "BadExpirationDate" => Self::BadExpirationDate,
            "BadMessageId" => Self::BadMessageId,
            "BadPriority" => Self::BadPriority,
            "BadTopic" => Self::BadTopic,
            "DeviceTokenNotForTopic" => Self::DeviceTokenNotForTopic,
            "DuplicateHeaders" => Self::DuplicateHeaders,
            "IdleTimeout" => Self::IdleTimeout,
            "InvalidPushType" => Self::InvalidPushType,
            "MissingDeviceToken" => Self::MissingDeviceToken,
            "MissingTopic" => Self::MissingTopic,
            "PayloadEmpty" => Self::PayloadEmpty,
            "PayloadTooLarge" => Self::PayloadTooLarge,
            "TopicDisallowed" => Self::TopicDisallowed,
            "BadCertificate" => Self::BadCertificate,
            "BadCertificateEnvironment" => Self::BadCertificateEnvironment,
            "ExpiredProviderToken" => Self::ExpiredProviderToken,
            "Forbidden" => Self::Forbidden,
            "InvalidProviderToken" => Self::InvalidProviderToken,
            "MissingProviderToken" => Self::MissingProviderToken,
            "BadPath" => Self::BadPath,
            "MethodNotAllowed" => Self::MethodNotAllowed,
            "ExpiredToken" => Self::ExpiredToken,
            "Unregistered" => Self::Unregistered,
            "TooManyProviderTokenUpdates" => Self::TooManyProviderTokenUpdates,
            "TooManyRequests" => Self::TooManyRequests,
            "InternalServerError" => Self::InternalServerError,
            "ServiceUnavailable" => Self::ServiceUnavailable,
            "Shutdown" => Self::Shutdown,
            other => Self::Other(other.to_string()),
        }
    }

    /// The raw reason string as the gateway spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BadCollapseId => "BadCollapseId",
            Self::BadDeviceToken => "BadDeviceToken",
            Self::BadExpirationDate => "BadExpirationDate",
            Self::BadMessageId => "BadMessageId",
            Self::BadPriority => "BadPriority",
            Self::BadTopic => "BadTopic",
            Self::DeviceTokenNotForTopic => "DeviceTokenNotForTopic",
            Self::DuplicateHeaders => "DuplicateHeaders",
            Self::IdleTimeout => "IdleTimeout",
            Self::InvalidPushType => "InvalidPushType",
            Self::MissingDeviceToken => "MissingDeviceToken",
            Self::MissingTopic => "MissingTopic",
            Self::PayloadEmpty => "PayloadEmpty",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::TopicDisallowed => "TopicDisallowed",
            Self::BadCertificate => "BadCertificate",
            Self::BadCertificateEnvironment => "BadCertificateEnvironment",
            Self::ExpiredProviderToken => "ExpiredProviderToken",
            Self::Forbidden => "Forbidden",
            Self::InvalidProviderToken => "InvalidProviderToken",
            Self::MissingProviderToken => "MissingProviderToken",
            Self::BadPath => "BadPath",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::ExpiredToken => "ExpiredToken",
            Self::Unregistered => "Unregistered",
            Self::TooManyProviderTokenUpdates => "TooManyProviderTokenUpdates",
            Self::TooManyRequests => "TooManyRequests",
            Self::InternalServerError => "InternalServerError",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::Shutdown => "Shutdown",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
