//! AEAD algorithms used by the MLS ciphersuites.
//!
//! - AES-128-GCM / AES-256-GCM (NIST SP 800-38D)
//! - ChaCha20-Poly1305 (RFC 8439)
//!
//! Ciphertexts carry the 16-byte authentication tag appended.

use aes_gcm::aead::{Aead, KeyInit, Nonce, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm};
use chacha20poly1305::ChaCha20Poly1305;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// HPKE AEAD identifiers (RFC 9180 §7.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum AeadId {
    /// AES-128-GCM
    Aes128Gcm = 0x0001,
    /// AES-256-GCM
    Aes256Gcm = 0x0002,
    /// ChaCha20-Poly1305
    ChaCha20Poly1305 = 0x0003,
}

impl AeadId {
    /// Look up an AEAD by its registry code.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for codes outside the supported set.
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            0x0001 => Ok(Self::Aes128Gcm),
            0x0002 => Ok(Self::Aes256Gcm),
            0x0003 => Ok(Self::ChaCha20Poly1305),
            _ => Err(Error::InvalidParameter("unsupported AEAD code")),
        }
    }

    /// Registry code for the wire.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Key size in bytes (`Nk`).
    pub const fn key_size(self) -> usize {
        match self {
            Self::Aes128Gcm => 16,
            Self::Aes256Gcm | Self::ChaCha20Poly1305 => 32,
        }
    }

    /// Nonce size in bytes (`Nn`).
    pub const fn nonce_size(self) -> usize {
        12
    }

    /// Authentication tag size in bytes (`Nt`).
    pub const fn tag_size(self) -> usize {
        16
    }

    /// `Seal(key, nonce, aad, pt)`: encrypt and authenticate, returning
    /// ciphertext with the tag appended.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on wrong key or nonce length; `AeadSeal` if the
    /// underlying cipher fails.
    pub fn seal(self, key: &[u8], nonce: &[u8], aad: &[u8], pt: &[u8]) -> Result<Vec<u8>> {
        self.check_lengths(key, nonce)?;
        match self {
            Self::Aes128Gcm => seal_with::<Aes128Gcm>(key, nonce, aad, pt),
            Self::Aes256Gcm => seal_with::<Aes256Gcm>(key, nonce, aad, pt),
            Self::ChaCha20Poly1305 => seal_with::<ChaCha20Poly1305>(key, nonce, aad, pt),
        }
    }

    /// `Open(key, nonce, aad, ct)`: decrypt and verify the tag.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on wrong key or nonce length; `HpkeDecryption` on
    /// tag mismatch or corrupted ciphertext.
    pub fn open(
        self,
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        ct: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        self.check_lengths(key, nonce)?;
        match self {
            Self::Aes128Gcm => open_with::<Aes128Gcm>(key, nonce, aad, ct),
            Self::Aes256Gcm => open_with::<Aes256Gcm>(key, nonce, aad, ct),
            Self::ChaCha20Poly1305 => open_with::<ChaCha20Poly1305>(key, nonce, aad, ct),
        }
    }

    fn check_lengths(self, key: &[u8], nonce: &[u8]) -> Result<()> {
        if key.len() != self.key_size() {
            return Err(Error::InvalidParameter("AEAD key length"));
        }
        if nonce.len() != self.nonce_size() {
            return Err(Error::InvalidParameter("AEAD nonce length"));
        }
        Ok(())
    }
}

fn seal_with<A: Aead + KeyInit>(key: &[u8], nonce: &[u8], aad: &[u8], pt: &[u8]) -> Result<Vec<u8>> {
    let cipher = A::new_from_slice(key).map_err(|_| Error::InvalidParameter("AEAD key length"))?;
    cipher
        .encrypt(Nonce::<A>::from_slice(nonce), Payload { msg: pt, aad })
        .map_err(|_| Error::AeadSeal)
}

fn open_with<A: Aead + KeyInit>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ct: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = A::new_from_slice(key).map_err(|_| Error::InvalidParameter("AEAD key length"))?;
    cipher
        .decrypt(Nonce::<A>::from_slice(nonce), Payload { msg: ct, aad })
        .map(Zeroizing::new)
        .map_err(|_| Error::HpkeDecryption)
}
