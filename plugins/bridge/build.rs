const COMMANDS: &[&str] = &[
    "get_permission_snapshot",
    "request_sms_permission",
    "request_notification_permission",
    "open_notification_listener_settings",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
