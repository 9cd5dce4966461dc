//! Example: Drive a bridge session without a device.
//!
//! Run with: cargo run -p paybridge-bridge --example simulate_session

use paybridge_bridge::{
    BridgeConfig, BridgeSession, PermissionsInterface, QueueExecutor, RecordingWebview,
};
use paybridge_detect::{decode_hex, PostedNotification, SmsBroadcast};
use paybridge_permissions::{AndroidPermission, FakePlatform, RequestCode};
use std::sync::Arc;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("paybridge_bridge=debug,paybridge_detect=debug")
        .init();

    println!("=== Bridge Session Example ===\n");

    let platform = Arc::new(FakePlatform::new(34, "com.masarify.app"));
    let executor = Arc::new(QueueExecutor::spawn("paybridge-ui")?);
    let session = Arc::new(BridgeSession::new(
        &BridgeConfig::default(),
        platform.clone(),
        executor.clone(),
    ));
    let interface = PermissionsInterface::new(&session);

    // Web runtime finishes loading
    let webview = Arc::new(RecordingWebview::new());
    session.on_webview_ready(webview.clone());
    println!("snapshot: {}", interface.get_permission_snapshot());

    // User taps "allow SMS" and accepts the prompt
    interface.request_sms_permission();
    executor.drain();
    platform.grant(AndroidPermission::ReceiveSms);
    session.on_request_permissions_result(RequestCode::Sms.code(), &[0]);

    // A two-part bank SMS arrives
    let pdus = [
        "00040A8110325476980000622071415000000ED9775D0E1A87E564D03D3C0701",
        "00040A8110325476980000622071415000000CF0709A0C2A1EA1A0580D06",
    ]
    .iter()
    .filter_map(|hex| decode_hex(hex))
    .collect();
    session
        .sms_receiver()
        .on_receive(&SmsBroadcast::received(pdus, "3gpp"));

    // A wallet app posts a notification, then an unrelated one
    session.notification_listener().on_notification_posted(Some(&PostedNotification::new(
        Some("Instapay"),
        Some("You received 500 EGP"),
    )));
    session
        .notification_listener()
        .on_notification_posted(Some(&PostedNotification::new(Some("Weather"), Some("Sunny"))));

    executor.drain();

    println!("\nScripts evaluated in the webview:");
    for script in webview.scripts() {
        println!("  {script}");
    }

    session.on_webview_destroyed();
    println!("\nDone.");
    Ok(())
}
