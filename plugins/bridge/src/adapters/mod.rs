//! Adapters that bridge Tauri to the bridge crate's abstractions.

mod main_thread;
mod webview;

pub use main_thread::MainThreadExecutor;
pub use webview::TauriWebview;
