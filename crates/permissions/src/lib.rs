//! Permission state for the payment bridge.
//!
//! Three independent facts make up a [`PermissionSnapshot`]:
//! - SMS receive permission (runtime permission from API 23)
//! - notification permission (runtime permission from API 33)
//! - notification-listener access (a settings toggle, never requestable)
//!
//! # Architecture
//!
//! ```text
//! provider.rs - Traits over the OS authorization APIs, NullPlatform
//! resolver.rs - Fresh snapshot computation (pure, no caching)
//! request.rs  - Request codes and the per-kind request state machine
//! fake.rs     - Scriptable in-memory platform for tests
//! ```
//!
//! [`PermissionSnapshot`]: paybridge_events::PermissionSnapshot

mod error;
mod fake;
mod provider;
mod request;
mod resolver;

pub use error::PlatformError;
pub use fake::FakePlatform;
pub use provider::{
    AndroidPermission, NullPlatform, PermissionPrompter, PermissionProvider, Platform,
    ENABLED_NOTIFICATION_LISTENERS,
};
pub use request::{RequestAction, RequestCode, RequestState, RequestTracker};
pub use resolver::{PermissionKind, PermissionResolver};

/// First API level with runtime permissions (Android 6.0, M).
pub const SDK_RUNTIME_PERMISSIONS: u32 = 23;

/// First API level where posting notifications needs a runtime grant (Android 13, TIRAMISU).
pub const SDK_NOTIFICATION_PERMISSION: u32 = 33;
