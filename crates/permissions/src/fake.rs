//! In-memory platform for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::PlatformError;
use crate::provider::{AndroidPermission, PermissionPrompter, PermissionProvider};
use crate::request::RequestCode;

/// Scriptable platform that records every prompt and settings launch.
///
/// Grants change only when the test says so; a prompt never grants anything
/// by itself.
pub struct FakePlatform {
    sdk_version: AtomicU32,
    package_name: String,
    granted: Mutex<HashSet<AndroidPermission>>,
    enabled_listeners: Mutex<Option<String>>,
    prompts: Mutex<Vec<RequestCode>>,
    settings_opened: AtomicUsize,
    refuse_prompts: AtomicBool,
}

impl FakePlatform {
    pub fn new(sdk_version: u32, package_name: impl Into<String>) -> Self {
        Self {
            sdk_version: AtomicU32::new(sdk_version),
            package_name: package_name.into(),
            granted: Mutex::new(HashSet::new()),
            enabled_listeners: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            settings_opened: AtomicUsize::new(0),
            refuse_prompts: AtomicBool::new(false),
        }
    }

    pub fn set_sdk_version(&self, sdk_version: u32) {
        self.sdk_version.store(sdk_version, Ordering::SeqCst);
    }

    pub fn grant(&self, permission: AndroidPermission) {
        self.granted.lock().unwrap().insert(permission);
    }

    pub fn revoke(&self, permission: AndroidPermission) {
        self.granted.lock().unwrap().remove(&permission);
    }

    pub fn set_enabled_listeners(&self, registry: Option<&str>) {
        *self.enabled_listeners.lock().unwrap() = registry.map(str::to_string);
    }

    /// Make every prompt and settings launch fail with `HostUnavailable`.
    pub fn refuse_prompts(&self, refuse: bool) {
        self.refuse_prompts.store(refuse, Ordering::SeqCst);
    }

    /// Request codes of every prompt shown, in order.
    pub fn prompts(&self) -> Vec<RequestCode> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn settings_opened(&self) -> usize {
        self.settings_opened.load(Ordering::SeqCst)
    }
}

impl PermissionProvider for FakePlatform {
    fn sdk_version(&self) -> u32 {
        self.sdk_version.load(Ordering::SeqCst)
    }

    fn is_granted(&self, permission: AndroidPermission) -> bool {
        self.granted.lock().unwrap().contains(&permission)
    }

    fn enabled_notification_listeners(&self) -> Option<String> {
        self.enabled_listeners.lock().unwrap().clone()
    }

    fn package_name(&self) -> String {
        self.package_name.clone()
    }
}

impl PermissionPrompter for FakePlatform {
    fn request_permissions(
        &self,
        _permissions: &[AndroidPermission],
        code: RequestCode,
    ) -> Result<(), PlatformError> {
        if self.refuse_prompts.load(Ordering::SeqCst) {
            return Err(PlatformError::HostUnavailable);
        }
        self.prompts.lock().unwrap().push(code);
        Ok(())
    }

    fn open_notification_listener_settings(&self) -> Result<(), PlatformError> {
        if self.refuse_prompts.load(Ordering::SeqCst) {
            return Err(PlatformError::HostUnavailable);
        }
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
