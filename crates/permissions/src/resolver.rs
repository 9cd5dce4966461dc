//! Permission State Resolver.

use paybridge_events::PermissionSnapshot;

use crate::provider::{AndroidPermission, PermissionProvider};
use crate::request::RequestCode;
use crate::{SDK_NOTIFICATION_PERMISSION, SDK_RUNTIME_PERMISSIONS};

/// The three facts a snapshot reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    Sms,
    Notifications,
    /// Settings toggle; resolved but never requested.
    NotificationListener,
}

impl PermissionKind {
    /// Runtime permission backing this kind, if it has a request flow.
    pub const fn runtime_permission(&self) -> Option<AndroidPermission> {
        match self {
            Self::Sms => Some(AndroidPermission::ReceiveSms),
            Self::Notifications => Some(AndroidPermission::PostNotifications),
            Self::NotificationListener => None,
        }
    }

    /// API level from which the permission must be granted at runtime.
    pub const fn runtime_since(&self) -> Option<u32> {
        match self {
            Self::Sms => Some(SDK_RUNTIME_PERMISSIONS),
            Self::Notifications => Some(SDK_NOTIFICATION_PERMISSION),
            Self::NotificationListener => None,
        }
    }

    pub const fn request_code(&self) -> Option<RequestCode> {
        match self {
            Self::Sms => Some(RequestCode::Sms),
            Self::Notifications => Some(RequestCode::Notifications),
            Self::NotificationListener => None,
        }
    }

    pub const fn is_requestable(&self) -> bool {
        self.runtime_permission().is_some()
    }
}

/// Computes snapshots from live OS state. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct PermissionResolver {
    package_name: Option<String>,
}

impl PermissionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the listener registry against `package_name` instead of the
    /// platform-reported identifier.
    pub fn with_package_name(package_name: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
        }
    }

    /// Query every field fresh.
    pub fn resolve<P: PermissionProvider + ?Sized>(&self, provider: &P) -> PermissionSnapshot {
        PermissionSnapshot::new(
            self.is_granted(provider, PermissionKind::Sms),
            self.is_granted(provider, PermissionKind::Notifications),
            self.is_granted(provider, PermissionKind::NotificationListener),
        )
    }

    pub fn is_granted<P: PermissionProvider + ?Sized>(
        &self,
        provider: &P,
        kind: PermissionKind,
    ) -> bool {
        match (kind.runtime_permission(), kind.runtime_since()) {
            (Some(permission), Some(since)) => {
                // Install-time grant below the runtime-permission level.
                provider.sdk_version() < since || provider.is_granted(permission)
            }
            _ => self.is_listener_enabled(provider),
        }
    }

    /// Substring match of the package name in the registry string.
    ///
    /// Looser than exact component matching: one package name contained in
    /// another also matches. An empty package name never matches, although
    /// a plain `contains("")` would accept any registry.
    fn is_listener_enabled<P: PermissionProvider + ?Sized>(&self, provider: &P) -> bool {
        let Some(registry) = provider.enabled_notification_listeners() else {
            return false;
        };
        let package_name = match &self.package_name {
            Some(name) => name.clone(),
            None => provider.package_name(),
        };
        !package_name.is_empty() && registry.contains(&package_name)
    }
}
