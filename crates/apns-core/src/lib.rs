//! # apns-core
//!
//! Protocol vocabulary for the APNs delivery engine.
//!
//! This crate defines everything about a push notification that is visible
//! on the wire, independent of any HTTP client:
//!
//! - **Notification model**: one variant per push type (`alert`,
//!   `background`, `voip`, `location`, `complication`, `liveactivity`,
//!   `fileprovider`, `widgets`, plus a caller-controlled raw escape hatch),
//!   each carrying only its legal fields
//! - **Wire encoding**: JSON body construction with the reserved-`aps`-key
//!   collision rule (the control block always wins over user payload fields)
//! - **Response interpretation**: HTTP status + error body → delivery
//!   confirmation or a typed gateway rejection
//! - **Error taxonomy**: the closed set of gateway rejection reasons, with
//!   an open `Other` case for forward compatibility

#![deny(unsafe_code)]

pub mod error;
pub mod notification;
mod payload;
pub mod response;

pub use error::{ErrorReason, PayloadError, ResponseError};
pub use notification::{
    Alert, AlertNotification, BackgroundNotification, ComplicationNotification, Expiration,
    FileProviderNotification, LiveActivityEvent, LiveActivityNotification, LocationNotification,
    Notification, Priority, PushType, RawNotification, VoipNotification, WidgetsNotification,
};
pub use response::{Delivered, interpret};
