//! Integration tests for the bridge crate.
//!
//! Drives a full session (event sources, dispatcher, pull surface) against a
//! scriptable platform and a recording webview.

use std::sync::Arc;

use paybridge_bridge::{
    BridgeConfig, BridgeSession, HandleStatus, InlineExecutor, PermissionsInterface,
    QueueExecutor, RecordingWebview, UiExecutorRef,
};
use paybridge_detect::{decode_hex, PostedNotification, SmsBroadcast};
use paybridge_permissions::{AndroidPermission, FakePlatform, RequestCode};

const PACKAGE: &str = "com.masarify.app";

/// "Your card was " / "paid EGP 150", two fragments of one message.
const PART_ONE: &str = "00040A8110325476980000622071415000000ED9775D0E1A87E564D03D3C0701";
const PART_TWO: &str = "00040A8110325476980000622071415000000CF0709A0C2A1EA1A0580D06";

fn setup(sdk: u32, executor: UiExecutorRef) -> (Arc<FakePlatform>, Arc<BridgeSession>) {
    let platform = Arc::new(FakePlatform::new(sdk, PACKAGE));
    let session = Arc::new(BridgeSession::new(
        &BridgeConfig::default(),
        platform.clone(),
        executor,
    ));
    (platform, session)
}

fn sms(parts: &[&str]) -> SmsBroadcast {
    let pdus = parts.iter().filter_map(|hex| decode_hex(hex)).collect();
    SmsBroadcast::received(pdus, "3gpp")
}

// =============================================================================
// Event delivery
// =============================================================================

mod delivery {
    use super::*;

    #[test]
    fn test_multipart_sms_reaches_web_hook() {
        let (_, session) = setup(34, Arc::new(InlineExecutor));
        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());

        session.sms_receiver().on_receive(&sms(&[PART_ONE, PART_TWO]));

        let scripts = webview.scripts();
        assert_eq!(scripts.len(), 2);
        assert_eq!(
            scripts[1],
            r#"window.onNativePaymentMessage && window.onNativePaymentMessage("Your card was paid EGP 150","sms_inbox");"#
        );
    }

    #[test]
    fn test_notification_reaches_web_hook() {
        let (_, session) = setup(34, Arc::new(InlineExecutor));
        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());

        let notification = PostedNotification::new(Some("Instapay"), Some("Transfer of 200 EGP"));
        session
            .notification_listener()
            .on_notification_posted(Some(&notification));

        assert_eq!(
            webview.scripts()[1],
            r#"window.onNativePaymentMessage && window.onNativePaymentMessage("Instapay Transfer of 200 EGP","notification_listener");"#
        );
    }

    #[test]
    fn test_both_sources_share_the_classifier() {
        let (_, session) = setup(34, Arc::new(InlineExecutor));
        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());

        // "Your card was " alone carries no keyword.
        session.sms_receiver().on_receive(&sms(&[PART_ONE]));
        session
            .notification_listener()
            .on_notification_posted(Some(&PostedNotification::new(Some("Your card was"), None)));
        assert_eq!(webview.scripts().len(), 1);

        session.sms_receiver().on_receive(&sms(&[PART_TWO]));
        session
            .notification_listener()
            .on_notification_posted(Some(&PostedNotification::new(None, Some("paid EGP 150"))));
        assert_eq!(webview.scripts().len(), 3);
    }

    #[test]
    fn test_events_before_ready_are_dropped() {
        let (_, session) = setup(34, Arc::new(InlineExecutor));

        session.sms_receiver().on_receive(&sms(&[PART_TWO]));

        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());

        // Only the ready snapshot; nothing was buffered.
        let scripts = webview.scripts();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("onNativePermissionsUpdate"));
    }

    #[test]
    fn test_events_after_teardown_are_dropped() {
        let (_, session) = setup(34, Arc::new(InlineExecutor));
        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());

        webview.destroy();
        session.sms_receiver().on_receive(&sms(&[PART_TWO]));
        session.on_webview_destroyed();
        session.sms_receiver().on_receive(&sms(&[PART_TWO]));

        assert_eq!(webview.scripts().len(), 1);
        assert_eq!(session.dispatcher().handle_status(), HandleStatus::Detached);
    }
}

// =============================================================================
// Permission round trips
// =============================================================================

mod permissions {
    use super::*;

    #[test]
    fn test_request_when_granted_pushes_once_without_prompt() {
        let (platform, session) = setup(34, Arc::new(InlineExecutor));
        platform.grant(AndroidPermission::ReceiveSms);
        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());
        let interface = PermissionsInterface::new(&session);

        interface.request_sms_permission();

        assert!(platform.prompts().is_empty());
        let scripts = webview.scripts();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[1].contains(r#""smsGranted":true"#));
    }

    #[test]
    fn test_prompt_then_result_pushes_fresh_snapshot() {
        let (platform, session) = setup(34, Arc::new(InlineExecutor));
        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());
        let interface = PermissionsInterface::new(&session);

        interface.request_notification_permission();
        assert_eq!(platform.prompts(), vec![RequestCode::Notifications]);
        assert_eq!(webview.scripts().len(), 1);

        platform.grant(AndroidPermission::PostNotifications);
        session.on_request_permissions_result(RequestCode::Notifications.code(), &[0]);

        let scripts = webview.scripts();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[1].contains(r#""notificationsGranted":true"#));
        assert_eq!(
            interface.get_permission_snapshot(),
            r#"{"smsGranted":false,"notificationsGranted":true,"notificationListenerEnabled":false,"platform":"android"}"#
        );
    }

    #[test]
    fn test_below_thresholds_snapshot() {
        let (platform, session) = setup(22, Arc::new(InlineExecutor));
        session.on_webview_ready(Arc::new(RecordingWebview::new()));
        let interface = PermissionsInterface::new(&session);

        interface.request_sms_permission();
        interface.request_notification_permission();

        assert!(platform.prompts().is_empty());
        assert_eq!(
            interface.get_permission_snapshot(),
            r#"{"smsGranted":true,"notificationsGranted":true,"notificationListenerEnabled":false,"platform":"android"}"#
        );
    }

    #[test]
    fn test_getter_after_session_gone() {
        let (_, session) = setup(34, Arc::new(InlineExecutor));
        let interface = PermissionsInterface::new(&session);
        drop(session);

        assert_eq!(interface.get_permission_snapshot(), "{}");
    }

    #[test]
    fn test_getter_after_host_destroyed() {
        let (_, session) = setup(22, Arc::new(InlineExecutor));
        let webview = Arc::new(RecordingWebview::new());
        session.on_webview_ready(webview.clone());
        let interface = PermissionsInterface::new(&session);
        assert_ne!(interface.get_permission_snapshot(), "{}");

        webview.destroy();
        session.on_webview_destroyed();

        // The session is still alive; the host is not.
        assert_eq!(interface.get_permission_snapshot(), "{}");
    }
}

// =============================================================================
// Threading
// =============================================================================

mod threading {
    use super::*;

    #[test]
    fn test_concurrent_emits_and_handle_swaps() {
        let executor = Arc::new(QueueExecutor::spawn("paybridge-ui-test").unwrap());
        let (_, session) = setup(34, executor.clone());
        let webviews: Vec<_> = (0..4).map(|_| Arc::new(RecordingWebview::new())).collect();
        session.on_webview_ready(webviews[0].clone());

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let session = session.clone();
                let webview = webviews[i].clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        session.sms_receiver().on_receive(&sms(&[PART_TWO]));
                    }
                    session.on_webview_ready(webview);
                    session.push_snapshot();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        executor.drain();

        let total: usize = webviews.iter().map(|w| w.scripts().len()).sum();
        // One ready snapshot up front, then per worker 25 messages plus two snapshots.
        assert_eq!(total, 1 + 4 * 27);
        for webview in &webviews {
            assert!(webview
                .threads()
                .iter()
                .all(|thread| thread.as_deref() == Some("paybridge-ui-test")));
        }
    }
}
