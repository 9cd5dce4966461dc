//! UI executor backed by the Tauri event loop.

use paybridge_bridge::{UiExecutor, UiTask};
use tauri::{AppHandle, Runtime};

/// Runs tasks on the main thread via `AppHandle::run_on_main_thread`.
pub struct MainThreadExecutor<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> MainThreadExecutor<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> UiExecutor for MainThreadExecutor<R> {
    fn submit(&self, task: UiTask) {
        // Fails only once the event loop is gone.
        if let Err(e) = self.app.run_on_main_thread(task) {
            tracing::debug!(error = %e, "drop_ui_task");
        }
    }
}
