//! Typed notification variants and shared header vocabulary.
//!
//! Each push type the gateway accepts gets its own struct carrying only the
//! fields that are legal for it; [`Notification`] is the closed sum over
//! them. Header-affecting attributes (`topic`, `apns-id`, expiration,
//! priority, collapse ID) live on the variant structs, the body content is
//! produced by [`Notification::encode`].

mod alert;
mod background;
mod complication;
mod file_provider;
mod live_activity;
mod location;
mod raw;
mod voip;
mod widgets;

pub use alert::{Alert, AlertNotification};
pub use background::BackgroundNotification;
pub use complication::ComplicationNotification;
pub use file_provider::FileProviderNotification;
pub use live_activity::{LiveActivityEvent, LiveActivityNotification};
pub use location::LocationNotification;
pub use raw::RawNotification;
pub use voip::VoipNotification;
pub use widgets::WidgetsNotification;

use uuid::Uuid;

use crate::error::PayloadError;
use crate::payload;

/// Protocol-level category of a notification (the `apns-push-type` header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushType {
    /// User-visible alert.
    Alert,
    /// Silent content refresh.
    Background,
    /// Incoming call via the VoIP push channel.
    Voip,
    /// Location query.
    Location,
    /// Watch complication refresh.
    Complication,
    /// Live Activity update.
    LiveActivity,
    /// File provider change signal.
    FileProvider,
    /// Widget timeline reload.
    Widgets,
}

impl PushType {
    /// The `apns-push-type` header value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Background => "background",
            Self::Voip => "voip",
            Self::Location => "location",
            Self::Complication => "complication",
            Self::LiveActivity => "liveactivity",
            Self::FileProvider => "fileprovider",
            Self::Widgets => "widgets",
        }
    }
}

/// Delivery priority (the `apns-priority` header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Deliver immediately (priority 10).
    Immediately,
    /// Let the gateway batch delivery to spare device power (priority 5).
    ConsideringDevicePower,
}

impl Priority {
    /// The `apns-priority` header value.
    #[must_use]
    pub fn header_value(self) -> &'static str {
        match self {
            Self::Immediately => "10",
            Self::ConsideringDevicePower => "5",
        }
    }
}

/// Delivery retry policy hint (the `apns-expiration` header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Attempt delivery once and discard (`apns-expiration: 0`).
    Immediately,
    /// No explicit expiration; the header is omitted and the gateway
    /// applies its default retention.
    Never,
    /// Retry until the given epoch second.
    At(i64),
}

impl Expiration {
    /// The `apns-expiration` header value, or `None` when the header is
    /// omitted.
    #[must_use]
    pub fn header_value(self) -> Option<String> {
        match self {
            Self::Immediately => Some("0".to_string()),
            Self::Never => None,
            Self::At(epoch_seconds) => Some(epoch_seconds.to_string()),
        }
    }
}

/// A push notification of any supported type.
///
/// Values are immutable inputs to encoding and request assembly; nothing in
/// the delivery path mutates them.
#[derive(Debug, Clone)]
pub enum Notification {
    /// User-visible alert notification.
    Alert(AlertNotification),
    /// Silent background refresh.
    Background(BackgroundNotification),
    /// VoIP push.
    Voip(VoipNotification),
    /// Location query push.
    Location(LocationNotification),
    /// Watch complication push.
    Complication(ComplicationNotification),
    /// Live Activity update.
    LiveActivity(LiveActivityNotification),
    /// File provider push.
    FileProvider(FileProviderNotification),
    /// Widget timeline reload.
    Widgets(WidgetsNotification),
    /// Caller-controlled push type and body.
    Raw(RawNotification),
}

impl Notification {
    /// The `apns-push-type` header value for this variant.
    #[must_use]
    pub fn push_type(&self) -> &str {
        match self {
            Self::Alert(_) => PushType::Alert.as_str(),
            Self::Background(_) => PushType::Background.as_str(),
            Self::Voip(_) => PushType::Voip.as_str(),
            Self::Location(_) => PushType::Location.as_str(),
            Self::Complication(_) => PushType::Complication.as_str(),
            Self::LiveActivity(_) => PushType::LiveActivity.as_str(),
            Self::FileProvider(_) => PushType::FileProvider.as_str(),
            Self::Widgets(_) => PushType::Widgets.as_str(),
            Self::Raw(n) => &n.push_type,
        }
    }

    /// Destination topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        match self {
            Self::Alert(n) => &n.topic,
            Self::Background(n) => &n.topic,
            Self::Voip(n) => &n.topic,
            Self::Location(n) => &n.topic,
            Self::Complication(n) => &n.topic,
            Self::LiveActivity(n) => &n.topic,
            Self::FileProvider(n) => &n.topic,
            Self::Widgets(n) => &n.topic,
            Self::Raw(n) => &n.topic,
        }
    }

    /// Client-supplied correlation identifier, if any.
    #[must_use]
    pub fn apns_id(&self) -> Option<Uuid> {
        match self {
            Self::Alert(n) => n.apns_id,
            Self::Background(n) => n.apns_id,
            Self::Voip(n) => n.apns_id,
            Self::Location(n) => n.apns_id,
            Self::Complication(n) => n.apns_id,
            Self::LiveActivity(n) => n.apns_id,
            Self::FileProvider(n) => n.apns_id,
            Self::Widgets(n) => n.apns_id,
            Self::Raw(n) => n.apns_id,
        }
    }

    /// Expiration hint; `None` for variants that carry no expiration
    /// (location and widgets).
    #[must_use]
    pub fn expiration(&self) -> Option<Expiration> {
        match self {
            Self::Alert(n) => Some(n.expiration),
            Self::Background(n) => Some(n.expiration),
            Self::Voip(n) => Some(n.expiration),
            Self::Location(_) | Self::Widgets(_) => None,
            Self::Complication(n) => Some(n.expiration),
            Self::LiveActivity(n) => Some(n.expiration),
            Self::FileProvider(n) => Some(n.expiration),
            Self::Raw(n) => Some(n.expiration),
        }
    }

    /// Caller-requested priority, if any. Request assembly overrides this
    /// for the fixed-priority variants (background and file provider).
    #[must_use]
    pub fn priority(&self) -> Option<Priority> {
        match self {
            Self::Alert(n) => n.priority,
            Self::Background(n) => n.priority,
            Self::Voip(n) => n.priority,
            Self::Location(n) => n.priority,
            Self::Complication(n) => n.priority,
            Self::LiveActivity(n) => n.priority,
            Self::FileProvider(n) => n.priority,
            Self::Widgets(n) => n.priority,
            Self::Raw(n) => n.priority,
        }
    }

    /// Collapse identifier, if any.
    #[must_use]
    pub fn collapse_id(&self) -> Option<&str> {
        match self {
            Self::Alert(n) => n.collapse_id.as_deref(),
            Self::Background(n) => n.collapse_id.as_deref(),
            Self::Voip(n) => n.collapse_id.as_deref(),
            Self::Location(n) => n.collapse_id.as_deref(),
            Self::Complication(n) => n.collapse_id.as_deref(),
            Self::LiveActivity(n) => n.collapse_id.as_deref(),
            Self::FileProvider(n) => n.collapse_id.as_deref(),
            Self::Widgets(n) => n.collapse_id.as_deref(),
            Self::Raw(n) => n.collapse_id.as_deref(),
        }
    }

    /// Encode the notification body.
    ///
    /// User payload fields are placed at the document root first; the
    /// variant's `aps` control block is written last and replaces any
    /// colliding user field wholesale. Raw notifications encode their
    /// payload verbatim.
    pub fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        match self {
            Self::Alert(n) => payload::encode_body(n.payload.as_ref(), n.control_block()),
            Self::Background(n) => payload::encode_body(n.payload.as_ref(), n.control_block()),
            Self::Voip(n) => payload::encode_body(n.payload.as_ref(), n.control_block()),
            Self::Location(n) => payload::encode_body(None, n.control_block()),
            Self::Complication(n) => payload::encode_body(n.payload.as_ref(), n.control_block()),
            Self::LiveActivity(n) => payload::encode_body(None, n.control_block()),
            Self::FileProvider(n) => payload::encode_body(n.payload.as_ref(), n.control_block()),
            Self::Widgets(n) => payload::encode_body(None, n.control_block()),
            Self::Raw(n) => payload::encode_raw(&n.payload),
        }
    }
}

impl From<AlertNotification> for Notification {
    fn from(n: AlertNotification) -> Self {
        Self::Alert(n)
    }
}

impl From<BackgroundNotification> for Notification {
    fn from(n: BackgroundNotification) -> Self {
        Self::Background(n)
    }
}

impl From<VoipNotification> for Notification {
    fn from(n: VoipNotification) -> Self {
        Self::Voip(n)
    }
}

impl From<LocationNotification> for Notification {
    fn from(n: LocationNotification) -> Self {
        Self::Location(n)
    }
}

impl From<ComplicationNotification> for Notification {
    fn from(n: ComplicationNotification) -> Self {
        Self::Complication(n)
    }
}

impl From<LiveActivityNotification> for Notification {
    fn from(n: LiveActivityNotification) -> Self {
        Self::LiveActivity(n)
    }
}

impl From<FileProviderNotification> for Notification {
    fn from(n: FileProviderNotification) -> Self {
        Self::FileProvider(n)
    }
}

impl From<WidgetsNotification> for Notification {
    fn from(n: WidgetsNotification) -> Self {
        Self::Widgets(n)
    }
}

impl From<RawNotification> for Notification {
    fn from(n: RawNotification) -> Self {
        Self::Raw(n)
    }
}
