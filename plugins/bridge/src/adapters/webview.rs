//! Webview handle adapter.

use paybridge_bridge::WebviewHandle;
use tauri::{AppHandle, Manager, Runtime};

/// Looks the webview up by label on every use, so holding this never keeps
/// the window alive.
pub struct TauriWebview<R: Runtime> {
    app: AppHandle<R>,
    label: String,
}

impl<R: Runtime> TauriWebview<R> {
    pub fn new(app: AppHandle<R>, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }
}

impl<R: Runtime> WebviewHandle for TauriWebview<R> {
    fn is_alive(&self) -> bool {
        self.app.get_webview_window(&self.label).is_some()
    }

    fn evaluate_script(&self, script: &str) {
        let Some(window) = self.app.get_webview_window(&self.label) else {
            return;
        };
        if let Err(e) = window.eval(script) {
            tracing::warn!(label = %self.label, error = %e, "eval_failed");
        }
    }
}
