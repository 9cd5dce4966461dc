use tauri::{command, AppHandle, Manager, Runtime};

use crate::error::{BridgeError, Result};
use crate::PayBridge;

fn bridge<R: Runtime>(app: &AppHandle<R>) -> Result<tauri::State<'_, PayBridge>> {
    app.try_state::<PayBridge>().ok_or(BridgeError::NotInitialized)
}

/// Serialized permission snapshot, computed fresh.
#[command]
pub async fn get_permission_snapshot<R: Runtime>(app: AppHandle<R>) -> Result<String> {
    Ok(bridge(&app)?.interface().get_permission_snapshot())
}

#[command]
pub async fn request_sms_permission<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    bridge(&app)?.interface().request_sms_permission();
    Ok(())
}

#[command]
pub async fn request_notification_permission<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    bridge(&app)?.interface().request_notification_permission();
    Ok(())
}

#[command]
pub async fn open_notification_listener_settings<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    bridge(&app)?.interface().open_notification_listener_settings();
    Ok(())
}
