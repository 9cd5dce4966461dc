use thiserror::Error;

/// Errors reported by a platform when it cannot perform a permission action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The platform has no such facility (e.g. desktop builds).
    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),

    /// The hosting activity is gone or not yet attached.
    #[error("host activity unavailable")]
    HostUnavailable,

    /// The OS call itself failed.
    #[error("platform call failed: {0}")]
    Failed(String),
}
