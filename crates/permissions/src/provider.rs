//! Provider traits for OS permission state.
//!
//! These traits abstract the Android authorization APIs so the resolver and
//! the session stay pure and testable.

use crate::error::PlatformError;
use crate::request::RequestCode;

/// Secure-settings key listing the enabled notification listener components.
pub const ENABLED_NOTIFICATION_LISTENERS: &str = "enabled_notification_listeners";

/// Runtime permissions the bridge may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AndroidPermission {
    ReceiveSms,
    PostNotifications,
}

impl AndroidPermission {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReceiveSms => "android.permission.RECEIVE_SMS",
            Self::PostNotifications => "android.permission.POST_NOTIFICATIONS",
        }
    }
}

/// Read-only view of the live OS authorization state.
///
/// Every call must query the OS; implementations must not cache.
pub trait PermissionProvider: Send + Sync {
    /// API level of the running OS.
    fn sdk_version(&self) -> u32;

    /// Whether the OS currently reports the permission as granted.
    fn is_granted(&self, permission: AndroidPermission) -> bool;

    /// Raw value of the enabled-listener registry, if set.
    fn enabled_notification_listeners(&self) -> Option<String>;

    /// Identifier of this application.
    fn package_name(&self) -> String;
}

/// OS interactions that show UI to the user.
pub trait PermissionPrompter: Send + Sync {
    /// Show the runtime permission prompt. The outcome arrives later as a
    /// permission result carrying `code`.
    fn request_permissions(
        &self,
        permissions: &[AndroidPermission],
        code: RequestCode,
    ) -> Result<(), PlatformError>;

    /// Open the system screen where notification-listener access is toggled.
    fn open_notification_listener_settings(&self) -> Result<(), PlatformError>;
}

/// Everything the session needs from the host OS.
pub trait Platform: PermissionProvider + PermissionPrompter {}

impl<T: PermissionProvider + PermissionPrompter> Platform for T {}

/// Platform for hosts without Android permission APIs.
///
/// Reports a current API level with nothing granted, so no field is
/// short-circuited to true, and refuses every prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlatform;

impl NullPlatform {
    pub const SDK_VERSION: u32 = 34;
}

impl PermissionProvider for NullPlatform {
    fn sdk_version(&self) -> u32 {
        Self::SDK_VERSION
    }

    fn is_granted(&self, _permission: AndroidPermission) -> bool {
        false
    }

    fn enabled_notification_listeners(&self) -> Option<String> {
        None
    }

    fn package_name(&self) -> String {
        String::new()
    }
}

impl PermissionPrompter for NullPlatform {
    fn request_permissions(
        &self,
        _permissions: &[AndroidPermission],
        _code: RequestCode,
    ) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("runtime permissions"))
    }

    fn open_notification_listener_settings(&self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("notification listener settings"))
    }
}
