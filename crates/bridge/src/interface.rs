//! Pull surface called from the web runtime.
//!
//! Calls arrive on an arbitrary thread. The snapshot getter answers
//! synchronously; the commands are moved onto the UI thread and return at
//! once.

use std::sync::{Arc, Weak};

use paybridge_events::EMPTY_SNAPSHOT_JSON;

use crate::executor::UiExecutorRef;
use crate::handle::HandleStatus;
use crate::session::BridgeSession;

/// Methods the web side may call. Holds the session weakly so a destroyed
/// activity is never kept alive by the web runtime.
#[derive(Clone)]
pub struct PermissionsInterface {
    session: Weak<BridgeSession>,
    executor: UiExecutorRef,
}

impl PermissionsInterface {
    pub fn new(session: &Arc<BridgeSession>) -> Self {
        Self {
            session: Arc::downgrade(session),
            executor: session.executor().clone(),
        }
    }

    /// Serialized fresh snapshot.
    ///
    /// `"{}"` when there is no live host: the session is gone, or its webview
    /// is not attached, torn down or detached.
    pub fn get_permission_snapshot(&self) -> String {
        let Some(session) = self.session.upgrade() else {
            tracing::debug!(reason = "session_gone", "empty_snapshot");
            return EMPTY_SNAPSHOT_JSON.to_string();
        };
        let status = session.dispatcher().handle_status();
        if status != HandleStatus::Alive {
            tracing::debug!(reason = "no_webview", ?status, "empty_snapshot");
            return EMPTY_SNAPSHOT_JSON.to_string();
        }
        session.snapshot_json()
    }

    pub fn request_sms_permission(&self) {
        self.post("request_sms_permission", BridgeSession::request_sms_permission);
    }

    pub fn request_notification_permission(&self) {
        self.post(
            "request_notification_permission",
            BridgeSession::request_notification_permission,
        );
    }

    pub fn open_notification_listener_settings(&self) {
        self.post(
            "open_notification_listener_settings",
            BridgeSession::open_notification_listener_settings,
        );
    }

    fn post(&self, command: &'static str, action: fn(&BridgeSession)) {
        let session = self.session.clone();
        self.executor.submit(Box::new(move || match session.upgrade() {
            Some(session) => action(&session),
            None => tracing::debug!(command, reason = "session_gone", "drop_command"),
        }));
    }
}
