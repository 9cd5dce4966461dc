//! Host platform binding.
//!
//! On Android the permission APIs and OS listeners live in the companion
//! mobile plugin. Every other target gets `NullPlatform`: nothing granted,
//! every prompt refused, no listeners.

#[cfg(target_os = "android")]
mod android;

use std::sync::Arc;

use paybridge_bridge::{BridgeSession, UiExecutorRef};
use paybridge_permissions::Platform;
use serde::de::DeserializeOwned;
use tauri::{plugin::PluginApi, AppHandle, Runtime};

use crate::error::Result;

pub(crate) struct PlatformBinding<R: Runtime> {
    platform: Arc<dyn Platform>,
    #[cfg(target_os = "android")]
    handle: tauri::plugin::PluginHandle<R>,
    #[cfg(not(target_os = "android"))]
    _runtime: std::marker::PhantomData<fn() -> R>,
}

impl<R: Runtime> PlatformBinding<R> {
    #[cfg(target_os = "android")]
    pub fn connect<C: DeserializeOwned>(api: &PluginApi<R, C>) -> Result<Self> {
        let handle = android::register(api)?;
        tracing::info!("android_platform_connected");
        Ok(Self {
            platform: Arc::new(android::AndroidPlatform::new(handle.clone())),
            handle,
        })
    }

    #[cfg(not(target_os = "android"))]
    pub fn connect<C: DeserializeOwned>(_api: &PluginApi<R, C>) -> Result<Self> {
        tracing::info!("null_platform_connected");
        Ok(Self {
            platform: Arc::new(paybridge_permissions::NullPlatform),
            _runtime: std::marker::PhantomData,
        })
    }

    pub fn platform(&self) -> Arc<dyn Platform> {
        self.platform.clone()
    }

    /// Executor for calls into the webview.
    ///
    /// Mobile plugin calls block on the Android main looper, so on Android the
    /// session runs on a dedicated queue thread and Tauri marshals `eval` onto
    /// the UI thread itself.
    #[cfg(target_os = "android")]
    pub fn executor(&self, _app: &AppHandle<R>) -> Result<UiExecutorRef> {
        let executor = paybridge_bridge::QueueExecutor::spawn("paybridge-ui")
            .map_err(|e| paybridge_permissions::PlatformError::Failed(e.to_string()))?;
        Ok(Arc::new(executor))
    }

    #[cfg(not(target_os = "android"))]
    pub fn executor(&self, app: &AppHandle<R>) -> Result<UiExecutorRef> {
        Ok(Arc::new(crate::adapters::MainThreadExecutor::new(app.clone())))
    }

    /// Route OS listener callbacks into the session's event sources.
    #[cfg(target_os = "android")]
    pub fn attach(&self, session: &Arc<BridgeSession>) -> Result<()> {
        android::register_listeners(&self.handle, session)
    }

    #[cfg(not(target_os = "android"))]
    pub fn attach(&self, _session: &Arc<BridgeSession>) -> Result<()> {
        Ok(())
    }
}
