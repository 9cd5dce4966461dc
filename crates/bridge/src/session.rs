//! Bridge session - one per hosting activity.
//!
//! Owns the dispatcher, both event sources and the permission request
//! lifecycle. Every push of a snapshot goes through here so the web side sees
//! state that was read from the OS at push time.

use std::sync::{Arc, Mutex};

use paybridge_detect::{NotificationListener, SmsReceiver};
use paybridge_events::{BridgeSink, BridgeSinkRef, PermissionSnapshot, EMPTY_SNAPSHOT_JSON};
use paybridge_permissions::{
    PermissionKind, PermissionResolver, Platform, RequestAction, RequestCode, RequestState,
    RequestTracker,
};

use crate::config::BridgeConfig;
use crate::dispatcher::BridgeDispatcher;
use crate::executor::UiExecutorRef;
use crate::handle::WebviewHandleRef;

pub struct BridgeSession {
    platform: Arc<dyn Platform>,
    resolver: PermissionResolver,
    dispatcher: Arc<BridgeDispatcher>,
    requests: Mutex<RequestTracker>,
    sms_receiver: SmsReceiver,
    notification_listener: NotificationListener,
}

impl BridgeSession {
    pub fn new(config: &BridgeConfig, platform: Arc<dyn Platform>, executor: UiExecutorRef) -> Self {
        let resolver = match &config.package_name {
            Some(name) => PermissionResolver::with_package_name(name.clone()),
            None => PermissionResolver::new(),
        };
        let dispatcher = Arc::new(BridgeDispatcher::new(config, executor));
        let sink: BridgeSinkRef = dispatcher.clone();

        Self {
            platform,
            resolver,
            dispatcher,
            requests: Mutex::new(RequestTracker::new()),
            sms_receiver: SmsReceiver::new(sink.clone()),
            notification_listener: NotificationListener::new(sink),
        }
    }

    pub fn dispatcher(&self) -> &Arc<BridgeDispatcher> {
        &self.dispatcher
    }

    pub fn executor(&self) -> &UiExecutorRef {
        self.dispatcher.executor()
    }

    pub fn sms_receiver(&self) -> &SmsReceiver {
        &self.sms_receiver
    }

    pub fn notification_listener(&self) -> &NotificationListener {
        &self.notification_listener
    }

    /// Fresh snapshot from live OS state.
    pub fn snapshot(&self) -> PermissionSnapshot {
        self.resolver.resolve(self.platform.as_ref())
    }

    /// Serialized snapshot, or `"{}"` if serialization fails.
    pub fn snapshot_json(&self) -> String {
        match self.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot_serialization_failed");
                EMPTY_SNAPSHOT_JSON.to_string()
            }
        }
    }

    pub fn push_snapshot(&self) {
        self.dispatcher.emit_permission_snapshot(self.snapshot());
    }

    /// The web runtime became ready (first load, or return to foreground).
    pub fn on_webview_ready(&self, handle: WebviewHandleRef) {
        tracing::info!("webview_ready");
        self.dispatcher.set_handle(handle);
        self.push_snapshot();
    }

    /// `on_webview_ready` run on the executor instead of the calling thread.
    ///
    /// For hosts whose ready callback fires on the main thread, where the
    /// platform queries behind the snapshot must not block.
    pub fn post_webview_ready(self: &Arc<Self>, handle: WebviewHandleRef) {
        let session = Arc::clone(self);
        self.executor()
            .submit(Box::new(move || session.on_webview_ready(handle)));
    }

    pub fn on_webview_destroyed(&self) {
        tracing::info!("webview_destroyed");
        self.dispatcher.clear_handle();
    }

    pub fn request_sms_permission(&self) {
        self.request(RequestCode::Sms);
    }

    pub fn request_notification_permission(&self) {
        self.request(RequestCode::Notifications);
    }

    /// Open the listener settings screen and push the state as it is now.
    ///
    /// The user toggles access outside the app; the next webview-ready
    /// reports the outcome.
    pub fn open_notification_listener_settings(&self) {
        if let Err(e) = self.platform.open_notification_listener_settings() {
            tracing::warn!(error = %e, "open_listener_settings_failed");
        }
        self.push_snapshot();
    }

    /// Permission prompt result from the OS.
    ///
    /// The grant array is ignored; a fresh snapshot is the source of truth.
    pub fn on_request_permissions_result(&self, code: i32, grant_results: &[i32]) {
        let Some(code) = RequestCode::from_code(code) else {
            tracing::debug!(code, "ignore_foreign_request_code");
            return;
        };

        let previous = match self.requests.lock() {
            Ok(mut requests) => requests.resolve(code),
            Err(_) => return,
        };
        tracing::info!(?code, ?previous, results = grant_results.len(), "permission_result");
        self.push_snapshot();
    }

    pub fn permission_state(&self, kind: PermissionKind) -> Option<RequestState> {
        self.requests.lock().ok()?.state(kind)
    }

    fn request(&self, code: RequestCode) {
        let kind = code.kind();
        let already_granted = self.resolver.is_granted(self.platform.as_ref(), kind);

        let action = match self.requests.lock() {
            Ok(mut requests) => requests.begin(code, already_granted),
            Err(_) => return,
        };

        match action {
            RequestAction::Resolve => {
                tracing::debug!(?kind, "permission_already_granted");
                self.push_snapshot();
            }
            RequestAction::Prompt(code) => {
                let permissions: Vec<_> = kind.runtime_permission().into_iter().collect();
                tracing::info!(?kind, code = code.code(), "permission_prompt");

                if let Err(e) = self.platform.request_permissions(&permissions, code) {
                    tracing::warn!(?kind, error = %e, "permission_prompt_failed");
                    if let Ok(mut requests) = self.requests.lock() {
                        requests.resolve(code);
                    }
                    self.push_snapshot();
                }
            }
        }
    }
}
