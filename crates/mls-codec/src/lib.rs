//! TLS presentation-language codec for the MLS wire format.
//!
//! Everything that crosses a trust or storage boundary in MLS is encoded in
//! the TLS presentation language (RFC 8446 §3, with the MLS variable-length
//! vectors of RFC 9420 §2.1.2). The encoding itself is provided by the
//! `tls_codec` crate; this crate pins down the two entry points the rest of
//! the workspace uses:
//!
//! - [`marshal`] — encode a value to its canonical byte string
//! - [`get`] — decode a value from a byte string, rejecting trailing bytes
//!
//! Decoding fails on truncated input, on a length prefix that exceeds the
//! remaining buffer, on an unknown discriminator, and on bytes left over
//! after a top-level decode.

pub mod bytes;
pub mod error;

pub use bytes::{from_ascii, from_hex, to_hex};
pub use error::{CodecError, Result};

// Re-exported so dependent crates use a single codec surface.
pub use tls_codec::{
    Deserialize, Serialize, Size, TlsDeserialize, TlsSerialize, TlsSize, VLBytes,
};

/// Encode `value` as its canonical TLS serialization.
pub fn marshal<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    value.tls_serialize_detached().map_err(CodecError::from)
}

/// Decode a `T` from `bytes`, consuming the entire buffer.
///
/// # Errors
///
/// [`CodecError::Tls`] when the input is truncated, a length prefix
/// overruns the buffer, or a discriminator is unknown;
/// [`CodecError::TrailingBytes`] when the buffer holds more than one
/// top-level value.
pub fn get<T: Deserialize>(bytes: &[u8]) -> Result<T> {
    let mut reader = bytes;
    let value = T::tls_deserialize(&mut reader)?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes {
            remaining: reader.len(),
        });
    }
    Ok(value)
}
