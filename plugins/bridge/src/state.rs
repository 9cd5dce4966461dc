use std::sync::Arc;

use paybridge_bridge::{BridgeSession, PermissionsInterface};

/// Plugin state managed by the app.
pub struct PayBridge {
    session: Arc<BridgeSession>,
    interface: PermissionsInterface,
    webview_label: String,
}

impl PayBridge {
    pub(crate) fn new(session: Arc<BridgeSession>, webview_label: String) -> Self {
        let interface = PermissionsInterface::new(&session);
        Self {
            session,
            interface,
            webview_label,
        }
    }

    pub fn session(&self) -> &Arc<BridgeSession> {
        &self.session
    }

    pub fn interface(&self) -> &PermissionsInterface {
        &self.interface
    }

    /// Whether `label` names the webview hosting the web runtime.
    pub fn hosts(&self, label: &str) -> bool {
        self.webview_label == label
    }
}
