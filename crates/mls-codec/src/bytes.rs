//! Byte-string helpers shared across the workspace.
//!
//! Owned byte sequences are plain `Vec<u8>` (or [`tls_codec::VLBytes`] where
//! a wire encoding is attached); these helpers cover the conversions the
//! protocol constants and test vectors need.

use crate::error::Result;

/// Convert an ASCII label to its byte representation.
///
/// MLS labels are US-ASCII with no trailing NUL; the conversion is exact.
pub fn from_ascii(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

/// Decode a hex string into bytes.
///
/// # Errors
///
/// Rejects odd-length input and non-hex digits.
///
/// # Example
///
/// ```
/// let bytes = mls_codec::from_hex("01020304").unwrap();
/// assert_eq!(bytes, vec![1, 2, 3, 4]);
/// assert!(mls_codec::from_hex("012").is_err());
/// assert!(mls_codec::from_hex("zz").is_err());
/// ```
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}

/// Encode bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
