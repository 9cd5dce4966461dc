//! Non-owning reference to the live web runtime.

use std::fmt;
use std::sync::{Arc, RwLock};

/// Capability to run script in the hosted web runtime.
///
/// The host owns the underlying view. Implementations must not keep it alive
/// and must report `is_alive() == false` once it is torn down.
pub trait WebviewHandle: Send + Sync {
    fn is_alive(&self) -> bool;

    /// Run `script`. Only called on the UI thread.
    fn evaluate_script(&self, script: &str);
}

/// Type alias for shared handle reference.
pub type WebviewHandleRef = Arc<dyn WebviewHandle>;

/// Lifecycle of the handle held by the dispatcher.
#[derive(Clone, Default)]
pub enum HandleState {
    /// No web runtime has become ready yet.
    #[default]
    Unattached,
    Attached(WebviewHandleRef),
    /// The hosting view was destroyed.
    Detached,
}

impl fmt::Debug for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unattached => f.write_str("Unattached"),
            Self::Attached(handle) => f
                .debug_struct("Attached")
                .field("alive", &handle.is_alive())
                .finish(),
            Self::Detached => f.write_str("Detached"),
        }
    }
}

/// Observable summary of `HandleState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    Unattached,
    Alive,
    /// Attached, but the view reports itself torn down.
    Stale,
    Detached,
}

/// Thread-safe slot for the current handle.
///
/// Reading an absent or stale handle is an expected outcome, never an error.
#[derive(Default)]
pub struct HandleSlot {
    state: RwLock<HandleState>,
}

impl HandleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is held.
    pub fn attach(&self, handle: WebviewHandleRef) {
        if let Ok(mut guard) = self.state.write() {
            *guard = HandleState::Attached(handle);
        }
    }

    pub fn detach(&self) {
        if let Ok(mut guard) = self.state.write() {
            *guard = HandleState::Detached;
        }
    }

    /// The held handle, if attached and alive.
    pub fn current(&self) -> Option<WebviewHandleRef> {
        let guard = self.state.read().ok()?;
        match &*guard {
            HandleState::Attached(handle) if handle.is_alive() => Some(Arc::clone(handle)),
            _ => None,
        }
    }

    pub fn status(&self) -> HandleStatus {
        let Ok(guard) = self.state.read() else {
            return HandleStatus::Detached;
        };
        match &*guard {
            HandleState::Unattached => HandleStatus::Unattached,
            HandleState::Attached(handle) if handle.is_alive() => HandleStatus::Alive,
            HandleState::Attached(_) => HandleStatus::Stale,
            HandleState::Detached => HandleStatus::Detached,
        }
    }
}

impl fmt::Debug for HandleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleSlot")
            .field("status", &self.status())
            .finish()
    }
}
