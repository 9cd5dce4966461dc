//! Posted-notification handling.

use paybridge_events::{BridgeSinkRef, MessageSource, PaymentMessageEvent};
use serde::Deserialize;

use crate::classifier::payment_text;

/// Extras of a posted notification. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedNotification {
    /// Package that posted the notification. Only used for logging.
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl PostedNotification {
    pub fn new(title: Option<&str>, text: Option<&str>) -> Self {
        Self {
            package_name: None,
            title: title.map(str::to_string),
            text: text.map(str::to_string),
        }
    }
}

/// Join title and body as `"<title> <text>"`, treating missing parts as empty.
pub fn notification_text(title: Option<&str>, text: Option<&str>) -> String {
    format!("{} {}", title.unwrap_or_default(), text.unwrap_or_default())
}

/// Event source for notifications posted by any app.
///
/// The classifier is the only filter; every notification on the device passes
/// through here.
pub struct NotificationListener {
    sink: BridgeSinkRef,
}

impl NotificationListener {
    pub fn new(sink: BridgeSinkRef) -> Self {
        Self { sink }
    }

    pub fn on_notification_posted(&self, notification: Option<&PostedNotification>) {
        let Some(notification) = notification else {
            tracing::debug!(reason = "no_extras", "skip_notification");
            return;
        };

        let message = notification_text(
            notification.title.as_deref(),
            notification.text.as_deref(),
        );
        let Some(text) = payment_text(&message) else {
            tracing::debug!(
                package = ?notification.package_name,
                reason = "not_payment_like",
                "skip_notification"
            );
            return;
        };

        let event = PaymentMessageEvent::new(text, MessageSource::NotificationListener);
        tracing::info!(
            id = %event.id,
            package = ?notification.package_name,
            len = text.len(),
            "payment_notification_detected"
        );
        self.sink.emit_payment_message(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paybridge_events::InMemorySink;
    use std::sync::Arc;

    fn listener() -> (Arc<InMemorySink>, NotificationListener) {
        let sink = Arc::new(InMemorySink::new());
        let listener = NotificationListener::new(sink.clone());
        (sink, listener)
    }

    #[test]
    fn test_notification_text_joins_with_space() {
        assert_eq!(notification_text(Some("Instapay"), None), "Instapay ");
        assert_eq!(notification_text(None, Some("paid")), " paid");
        assert_eq!(notification_text(None, None), " ");
        assert_eq!(notification_text(Some("a"), Some("b")), "a b");
    }

    #[test]
    fn test_title_only_notification_is_emitted_trimmed() {
        let (sink, listener) = listener();

        listener.on_notification_posted(Some(&PostedNotification::new(Some("Instapay"), None)));

        let messages = sink.payment_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].raw_message, "Instapay");
        assert_eq!(messages[0].source, MessageSource::NotificationListener);
    }

    #[test]
    fn test_weather_notification_is_dropped() {
        let (sink, listener) = listener();

        listener.on_notification_posted(Some(&PostedNotification::new(
            Some("Weather"),
            Some("Sunny today"),
        )));

        assert!(sink.is_empty());
    }

    #[test]
    fn test_missing_extras_are_dropped() {
        let (sink, listener) = listener();

        listener.on_notification_posted(None);
        listener.on_notification_posted(Some(&PostedNotification::default()));

        assert!(sink.is_empty());
    }

    #[test]
    fn test_body_match() {
        let (sink, listener) = listener();

        listener.on_notification_posted(Some(&PostedNotification::new(
            Some("CIB"),
            Some("Purchase of EGP 320.00 at CARREFOUR"),
        )));

        assert_eq!(
            sink.payment_messages()[0].raw_message,
            "CIB Purchase of EGP 320.00 at CARREFOUR"
        );
    }

    #[test]
    fn test_deserialize_partial_extras() {
        let notification: PostedNotification =
            serde_json::from_str(r#"{"packageName":"com.bank","title":null}"#).unwrap();
        assert_eq!(notification.package_name.as_deref(), Some("com.bank"));
        assert!(notification.title.is_none());
        assert!(notification.text.is_none());
    }
}
