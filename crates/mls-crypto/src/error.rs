//! Error types for cryptographic operations.

use thiserror::Error;

/// Result type alias for cryptographic operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Cryptographic operation errors.
///
/// Signature verification failure is deliberately *not* represented here:
/// `verify` reports it as `Ok(false)` because a bad signature is a semantic
/// outcome, not an exceptional condition.
#[derive(Debug, Error)]
pub enum Error {
    /// Uninitialized ciphersuite, unsupported algorithm code, or
    /// inconsistent key material.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// AEAD open returned no plaintext: tag mismatch, corrupted ciphertext,
    /// or a wrong info/aad pairing.
    #[error("HPKE decryption failure")]
    HpkeDecryption,

    /// AEAD seal failed in the underlying cipher.
    #[error("AEAD seal failure")]
    AeadSeal,

    /// The HPKE context sequence counter is exhausted.
    #[error("HPKE message limit reached")]
    MessageLimitReached,

    /// Key derivation failed: output length out of range for the KDF, or
    /// candidate rejection sampling exhausted.
    #[error("key derivation failed: {0}")]
    KeyDerivation(&'static str),

    /// Wire-format encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] mls_codec::CodecError),
}
