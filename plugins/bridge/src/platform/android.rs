//! Android platform backed by the companion mobile plugin.

use std::sync::{Arc, Weak};

use paybridge_bridge::BridgeSession;
use paybridge_detect::{PostedNotification, SmsBroadcast};
use paybridge_permissions::{
    AndroidPermission, NullPlatform, PermissionPrompter, PermissionProvider, PlatformError,
    RequestCode, ENABLED_NOTIFICATION_LISTENERS,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tauri::{
    ipc::{Channel, InvokeResponseBody},
    plugin::{PluginApi, PluginHandle},
    Runtime,
};

use crate::error::Result;

const PLUGIN_IDENTIFIER: &str = "com.masarify.paybridge";
const PLUGIN_CLASS: &str = "PayBridgePlugin";

pub fn register<R: Runtime, C: DeserializeOwned>(api: &PluginApi<R, C>) -> Result<PluginHandle<R>> {
    api.register_android_plugin(PLUGIN_IDENTIFIER, PLUGIN_CLASS)
        .map_err(|e| PlatformError::Failed(e.to_string()).into())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SdkVersion {
    sdk_int: u32,
}

#[derive(Deserialize)]
struct Granted {
    granted: bool,
}

#[derive(Deserialize)]
struct SecureSetting {
    value: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageName {
    package_name: String,
}

#[derive(Serialize)]
struct PermissionArgs<'a> {
    permission: &'a str,
}

#[derive(Serialize)]
struct SecureSettingArgs<'a> {
    key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestArgs<'a> {
    permissions: Vec<&'a str>,
    request_code: i32,
}

/// Permission queries and prompts over `run_mobile_plugin`.
///
/// Queries that fail report the most conservative answer: a current API
/// level, nothing granted, no listener registry.
pub struct AndroidPlatform<R: Runtime> {
    handle: PluginHandle<R>,
}

impl<R: Runtime> AndroidPlatform<R> {
    pub fn new(handle: PluginHandle<R>) -> Self {
        Self { handle }
    }

    fn query<T: DeserializeOwned>(&self, command: &'static str, payload: impl Serialize) -> Option<T> {
        match self.handle.run_mobile_plugin::<T>(command, payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(command, error = %e, "mobile_query_failed");
                None
            }
        }
    }

    fn call(&self, command: &'static str, payload: impl Serialize) -> std::result::Result<(), PlatformError> {
        self.handle
            .run_mobile_plugin::<serde_json::Value>(command, payload)
            .map(|_| ())
            .map_err(|e| PlatformError::Failed(e.to_string()))
    }
}

impl<R: Runtime> PermissionProvider for AndroidPlatform<R> {
    fn sdk_version(&self) -> u32 {
        self.query::<SdkVersion>("sdkVersion", ())
            .map(|v| v.sdk_int)
            .unwrap_or(NullPlatform::SDK_VERSION)
    }

    fn is_granted(&self, permission: AndroidPermission) -> bool {
        let args = PermissionArgs {
            permission: permission.as_str(),
        };
        self.query::<Granted>("checkPermission", args)
            .is_some_and(|g| g.granted)
    }

    fn enabled_notification_listeners(&self) -> Option<String> {
        let args = SecureSettingArgs {
            key: ENABLED_NOTIFICATION_LISTENERS,
        };
        self.query::<SecureSetting>("getSecureSetting", args)
            .and_then(|s| s.value)
    }

    fn package_name(&self) -> String {
        self.query::<PackageName>("packageName", ())
            .map(|p| p.package_name)
            .unwrap_or_default()
    }
}

impl<R: Runtime> PermissionPrompter for AndroidPlatform<R> {
    fn request_permissions(
        &self,
        permissions: &[AndroidPermission],
        code: RequestCode,
    ) -> std::result::Result<(), PlatformError> {
        let args = RequestArgs {
            permissions: permissions.iter().map(AndroidPermission::as_str).collect(),
            request_code: code.code(),
        };
        self.call("requestPermissions", args)
    }

    fn open_notification_listener_settings(&self) -> std::result::Result<(), PlatformError> {
        self.call("openNotificationListenerSettings", ())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermissionResult {
    request_code: i32,
    #[serde(default)]
    grant_results: Vec<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListenerChannels {
    sms: Channel,
    notification: Channel,
    permission_result: Channel,
}

/// Hand the mobile plugin one channel per OS callback.
///
/// Channels hold the session weakly; callbacks after teardown are dropped.
pub fn register_listeners<R: Runtime>(
    handle: &PluginHandle<R>,
    session: &Arc<BridgeSession>,
) -> Result<()> {
    let session = Arc::downgrade(session);
    let channels = ListenerChannels {
        sms: channel(&session, "sms", |session, broadcast: SmsBroadcast| {
            session.sms_receiver().on_receive(&broadcast);
        }),
        notification: channel(
            &session,
            "notification",
            |session, notification: Option<PostedNotification>| {
                session
                    .notification_listener()
                    .on_notification_posted(notification.as_ref());
            },
        ),
        permission_result: channel(&session, "permission_result", |session, result: PermissionResult| {
            session.on_request_permissions_result(result.request_code, &result.grant_results);
        }),
    };

    handle
        .run_mobile_plugin::<serde_json::Value>("registerListeners", channels)
        .map_err(|e| PlatformError::Failed(e.to_string()))?;
    tracing::info!("android_listeners_registered");
    Ok(())
}

fn channel<T, F>(session: &Weak<BridgeSession>, kind: &'static str, deliver: F) -> Channel
where
    T: DeserializeOwned,
    F: Fn(&BridgeSession, T) + Send + Sync + 'static,
{
    let session = session.clone();
    Channel::new(move |body| {
        let Some(session) = session.upgrade() else {
            tracing::debug!(kind, reason = "session_gone", "drop_listener_message");
            return Ok(());
        };
        match decode::<T>(body) {
            Ok(message) => deliver(&session, message),
            Err(e) => tracing::warn!(kind, error = %e, "listener_message_invalid"),
        }
        Ok(())
    })
}

fn decode<T: DeserializeOwned>(body: InvokeResponseBody) -> serde_json::Result<T> {
    match body {
        InvokeResponseBody::Json(json) => serde_json::from_str(&json),
        InvokeResponseBody::Raw(bytes) => serde_json::from_slice(&bytes),
    }
}
