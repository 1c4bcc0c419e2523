//! Error types for wire-format encoding and decoding.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, CodecError>;

/// Wire-format encoding and decoding errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// TLS (de)serialization failed: truncated input, a length prefix past
    /// the end of the buffer, or an unknown discriminator.
    #[error("TLS codec error: {0}")]
    Tls(#[from] tls_codec::Error),

    /// A top-level decode succeeded but left bytes in the buffer.
    #[error("{remaining} trailing bytes after top-level decode")]
    TrailingBytes {
        /// Number of undecoded bytes left in the input.
        remaining: usize,
    },

    /// Hex decoding failed on odd-length or non-hex input.
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}
