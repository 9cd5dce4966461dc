//! Bridge Dispatcher - the single path from native events to the web runtime.

use paybridge_events::{BridgeSink, PaymentMessageEvent, PermissionSnapshot};

use crate::config::BridgeConfig;
use crate::executor::UiExecutorRef;
use crate::handle::{HandleSlot, HandleStatus, WebviewHandleRef};
use crate::script::{payment_message_script, permissions_update_script};

/// Serializes pushes into hook calls and posts them onto the UI thread.
///
/// Delivery is at most once: with no live handle the push is dropped, and
/// nothing is queued or retried.
pub struct BridgeDispatcher {
    slot: HandleSlot,
    executor: UiExecutorRef,
    payment_hook: String,
    permissions_hook: String,
}

impl BridgeDispatcher {
    pub fn new(config: &BridgeConfig, executor: UiExecutorRef) -> Self {
        Self {
            slot: HandleSlot::new(),
            executor,
            payment_hook: config.payment_hook.clone(),
            permissions_hook: config.permissions_hook.clone(),
        }
    }

    /// Hold `handle` from now on, replacing any previous one.
    pub fn set_handle(&self, handle: WebviewHandleRef) {
        self.slot.attach(handle);
        tracing::debug!("webview_attached");
    }

    pub fn clear_handle(&self) {
        self.slot.detach();
        tracing::debug!("webview_detached");
    }

    pub fn handle_status(&self) -> HandleStatus {
        self.slot.status()
    }

    pub fn executor(&self) -> &UiExecutorRef {
        &self.executor
    }

    fn post(&self, kind: &'static str, script: String) {
        let Some(handle) = self.slot.current() else {
            tracing::debug!(kind, status = ?self.slot.status(), "drop_push_no_webview");
            return;
        };

        self.executor.submit(Box::new(move || {
            // The view may have been torn down while the task was queued.
            if !handle.is_alive() {
                tracing::debug!(kind, "drop_push_webview_gone");
                return;
            }
            handle.evaluate_script(&script);
        }));
    }
}

impl BridgeSink for BridgeDispatcher {
    fn emit_payment_message(&self, event: PaymentMessageEvent) {
        let script = payment_message_script(&self.payment_hook, &event);
        tracing::debug!(id = %event.id, source = %event.source, "push_payment_message");
        self.post("payment_message", script);
    }

    fn emit_permission_snapshot(&self, snapshot: PermissionSnapshot) {
        let script = match permissions_update_script(&self.permissions_hook, &snapshot) {
            Ok(script) => script,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot_serialization_failed");
                return;
            }
        };
        tracing::debug!(?snapshot, "push_permission_snapshot");
        self.post("permission_snapshot", script);
    }
}
