//! Message contracts between the native listeners and the hosted web runtime.
//!
//! Everything that crosses the bridge is defined here so the Rust producers and
//! the web-side hooks agree on field names. The TypeScript side mirrors these
//! shapes.
//!
//! Also provides the `BridgeSink` trait the event sources push into.

mod sink;

pub use sink::{BridgeSink, BridgeSinkRef, EmittedEvent, InMemorySink, NullSink};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Serialization returned by the pull surface when no snapshot can be built.
pub const EMPTY_SNAPSHOT_JSON: &str = "{}";

/// Where a payment-like text was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSource {
    /// Inbound SMS broadcast.
    SmsInbox,
    /// A notification posted by any app on the device.
    NotificationListener,
}

impl MessageSource {
    /// Tag passed to the web hook as its second argument.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SmsInbox => "sms_inbox",
            Self::NotificationListener => "notification_listener",
        }
    }
}

impl fmt::Display for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A qualifying inbound text, created once and delivered at most once.
///
/// Producers: SMS receiver, notification listener
/// Consumers: bridge dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMessageEvent {
    /// Correlation id for logs. Never sent to the web runtime.
    pub id: Uuid,
    /// Trimmed message text.
    pub raw_message: String,
    /// Listener that observed the text.
    pub source: MessageSource,
    /// When the listener produced the event.
    pub received_at: DateTime<Utc>,
}

impl PaymentMessageEvent {
    pub fn new(raw_message: impl Into<String>, source: MessageSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_message: raw_message.into(),
            source,
            received_at: Utc::now(),
        }
    }
}

/// Platform tag carried by every snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
}

/// Live permission state at the instant it was computed. Never cached.
///
/// Producers: permission resolver
/// Consumers: bridge dispatcher (push), pull surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSnapshot {
    pub sms_granted: bool,
    pub notifications_granted: bool,
    pub notification_listener_enabled: bool,
    #[serde(default)]
    pub platform: Platform,
}

impl PermissionSnapshot {
    pub fn new(
        sms_granted: bool,
        notifications_granted: bool,
        notification_listener_enabled: bool,
    ) -> Self {
        Self {
            sms_granted,
            notifications_granted,
            notification_listener_enabled,
            platform: Platform::Android,
        }
    }

    /// JSON object handed to `onNativePermissionsUpdate` and returned by the pull surface.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Names of the global web-side functions the bridge invokes.
pub mod hook_names {
    /// `onNativePaymentMessage(rawMessage, source)`
    pub const PAYMENT_MESSAGE: &str = "onNativePaymentMessage";
    /// `onNativePermissionsUpdate(snapshot)`
    pub const PERMISSIONS_UPDATE: &str = "onNativePermissionsUpdate";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = PermissionSnapshot::new(true, false, true);
        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "smsGranted": true,
                "notificationsGranted": false,
                "notificationListenerEnabled": true,
                "platform": "android",
            })
        );
    }

    #[test]
    fn test_snapshot_deserialize_without_platform() {
        let json = r#"{"smsGranted":false,"notificationsGranted":true,"notificationListenerEnabled":false}"#;
        let snapshot: PermissionSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.notifications_granted);
        assert_eq!(snapshot.platform, Platform::Android);
    }

    #[test]
    fn test_message_source_tags() {
        assert_eq!(MessageSource::SmsInbox.as_str(), "sms_inbox");
        assert_eq!(
            serde_json::to_string(&MessageSource::NotificationListener).unwrap(),
            "\"notification_listener\""
        );
        assert_eq!(MessageSource::SmsInbox.to_string(), "sms_inbox");
    }

    #[test]
    fn test_payment_events_get_distinct_ids() {
        let a = PaymentMessageEvent::new("paid", MessageSource::SmsInbox);
        let b = PaymentMessageEvent::new("paid", MessageSource::SmsInbox);
        assert_ne!(a.id, b.id);
        assert_eq!(a.raw_message, "paid");
    }
}
