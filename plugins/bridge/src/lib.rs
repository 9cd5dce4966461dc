//! Tauri plugin for the payment message bridge.
//!
//! Configure under `plugins.paybridge` in `tauri.conf.json`:
//!
//! ```json
//! { "plugins": { "paybridge": { "webviewLabel": "main" } } }
//! ```

use std::sync::Arc;

use paybridge_bridge::{BridgeConfig, BridgeSession, WebviewHandleRef};
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, RunEvent, Runtime, WindowEvent,
};

mod adapters;
mod commands;
mod error;
mod platform;
mod state;

pub use adapters::{MainThreadExecutor, TauriWebview};
pub use error::{BridgeError, Result};
pub use state::PayBridge;

use platform::PlatformBinding;

const PLUGIN_NAME: &str = "paybridge";

pub fn init<R: Runtime>() -> TauriPlugin<R, Option<BridgeConfig>> {
    Builder::<R, Option<BridgeConfig>>::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::get_permission_snapshot,
            commands::request_sms_permission,
            commands::request_notification_permission,
            commands::open_notification_listener_settings,
        ])
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            config.validate().map_err(BridgeError::from)?;

            let binding = PlatformBinding::connect(&api)?;
            let executor = binding.executor(app)?;
            let session = Arc::new(BridgeSession::new(&config, binding.platform(), executor));
            binding.attach(&session)?;

            tracing::info!(
                webview = %config.webview_label,
                payment_hook = %config.payment_hook,
                permissions_hook = %config.permissions_hook,
                "paybridge_initialized"
            );
            app.manage(PayBridge::new(session, config.webview_label));
            Ok(())
        })
        .on_webview_ready(|webview| {
            let app = webview.app_handle();
            let Some(bridge) = app.try_state::<PayBridge>() else {
                return;
            };
            if !bridge.hosts(webview.label()) {
                return;
            }
            let handle: WebviewHandleRef = Arc::new(TauriWebview::new(app.clone(), webview.label()));
            // Fires on the main thread; the ready snapshot queries the platform.
            bridge.session().post_webview_ready(handle);
        })
        .on_event(|app, event| {
            if let RunEvent::WindowEvent {
                label,
                event: WindowEvent::Destroyed,
                ..
            } = event
            {
                if let Some(bridge) = app.try_state::<PayBridge>() {
                    if bridge.hosts(label) {
                        bridge.session().on_webview_destroyed();
                    }
                }
            }
        })
        .build()
}
