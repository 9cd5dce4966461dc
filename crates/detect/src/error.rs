//! Error types for PDU decoding.

use thiserror::Error;

/// Errors that can occur while decoding a single SMS fragment.
///
/// The SMS receiver never surfaces these; a failed fragment contributes an
/// empty body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PduError {
    /// The PDU ended before the field at this byte offset.
    #[error("pdu truncated at offset {0}")]
    Truncated(usize),

    /// The message type indicator is not SMS-DELIVER.
    #[error("not an SMS-DELIVER pdu (message type {0})")]
    NotDeliver(u8),

    /// The broadcast format tag is not one this decoder understands.
    #[error("unsupported sms format: {0}")]
    UnsupportedFormat(String),

    /// The data coding scheme declares compressed user data.
    #[error("compressed user data is not supported")]
    Compressed,
}
