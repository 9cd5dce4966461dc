//! Permission request codes and lifecycle tracking.

use serde::Serialize;

use crate::resolver::PermissionKind;

/// Correlates a permission prompt with its result callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestCode {
    Sms,
    Notifications,
}

impl RequestCode {
    pub const fn code(&self) -> i32 {
        match self {
            Self::Sms => 2301,
            Self::Notifications => 2302,
        }
    }

    /// Map a raw code from the OS back to a request. Foreign codes yield `None`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            2301 => Some(Self::Sms),
            2302 => Some(Self::Notifications),
            _ => None,
        }
    }

    pub const fn kind(&self) -> PermissionKind {
        match self {
            Self::Sms => PermissionKind::Sms,
            Self::Notifications => PermissionKind::Notifications,
        }
    }
}

/// Where a requestable permission is in its request lifecycle.
///
/// `Resolved` means a fresh snapshot was computed and pushed, not that the
/// permission was granted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Unknown,
    Requested,
    Resolved,
}

/// What the caller must do after `RequestTracker::begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    /// Show the OS prompt with this code and wait for the result.
    Prompt(RequestCode),
    /// No prompt needed; push a snapshot now.
    Resolve,
}

/// Request state for the SMS and notification permissions.
#[derive(Debug, Default)]
pub struct RequestTracker {
    sms: RequestState,
    notifications: RequestState,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` for kinds without a request flow.
    pub fn state(&self, kind: PermissionKind) -> Option<RequestState> {
        match kind {
            PermissionKind::Sms => Some(self.sms),
            PermissionKind::Notifications => Some(self.notifications),
            PermissionKind::NotificationListener => None,
        }
    }

    fn slot(&mut self, code: RequestCode) -> &mut RequestState {
        match code {
            RequestCode::Sms => &mut self.sms,
            RequestCode::Notifications => &mut self.notifications,
        }
    }

    /// Start a request for `code`. Already-granted permissions short-circuit
    /// straight to `Resolved`.
    pub fn begin(&mut self, code: RequestCode, already_granted: bool) -> RequestAction {
        let slot = self.slot(code);
        if already_granted {
            *slot = RequestState::Resolved;
            RequestAction::Resolve
        } else {
            *slot = RequestState::Requested;
            RequestAction::Prompt(code)
        }
    }

    /// Record the OS result for `code`, whatever the grant outcome.
    pub fn resolve(&mut self, code: RequestCode) -> RequestState {
        let slot = self.slot(code);
        let previous = *slot;
        *slot = RequestState::Resolved;
        previous
    }
}
