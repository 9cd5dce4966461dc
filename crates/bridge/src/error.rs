use thiserror::Error;

/// Invalid bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A hook name is spliced into generated script, so it must be a plain
    /// JavaScript identifier.
    #[error("invalid web hook name {0:?}: expected a JavaScript identifier")]
    InvalidHookName(String),

    #[error("webview label must not be empty")]
    EmptyWebviewLabel,
}
