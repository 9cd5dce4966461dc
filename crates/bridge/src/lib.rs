//! Native-to-web bridge for payment message detection.
//!
//! This crate is the only place that talks to the hosted web runtime. It
//! provides:
//! - A dispatcher that turns events into calls of global web hooks
//! - A session that owns the permission request lifecycle
//! - A pull surface the web side calls synchronously
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  SMS receiver / notification listener (paybridge-detect)  │
//! └───────────────────────────────────────────────────────────┘
//!                            │ BridgeSink
//!                            ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  dispatcher.rs - script building, handle check, UI post   │
//! │  handle.rs     - attach/detach state of the webview       │
//! │  executor.rs   - ordered fire-and-forget UI-thread tasks  │
//! └───────────────────────────────────────────────────────────┘
//!                            ▲
//!                            │ snapshots
//! ┌───────────────────────────────────────────────────────────┐
//! │  session.rs    - webview lifecycle, permission requests   │
//! │  interface.rs  - pull surface called from the web side    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use paybridge_bridge::{BridgeConfig, BridgeSession, PermissionsInterface, QueueExecutor};
//! use paybridge_permissions::NullPlatform;
//! use std::sync::Arc;
//!
//! let executor = Arc::new(QueueExecutor::spawn("paybridge-ui")?);
//! let session = Arc::new(BridgeSession::new(&BridgeConfig::default(), Arc::new(NullPlatform), executor));
//! session.on_webview_ready(webview);
//!
//! let interface = PermissionsInterface::new(&session);
//! let json = interface.get_permission_snapshot();
//! ```

mod config;
mod dispatcher;
mod error;
mod executor;
mod handle;
mod interface;
mod script;
mod session;
mod testing;

pub use config::BridgeConfig;
pub use dispatcher::BridgeDispatcher;
pub use error::ConfigError;
pub use executor::{InlineExecutor, QueueExecutor, UiExecutor, UiExecutorRef, UiTask};
pub use handle::{HandleSlot, HandleState, HandleStatus, WebviewHandle, WebviewHandleRef};
pub use interface::PermissionsInterface;
pub use script::{hook_call, payment_message_script, permissions_update_script, quote_js_string};
pub use session::BridgeSession;
pub use testing::RecordingWebview;

pub use paybridge_events::{
    BridgeSink, MessageSource, PaymentMessageEvent, PermissionSnapshot, EMPTY_SNAPSHOT_JSON,
};
