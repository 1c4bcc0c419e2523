//! HKDF-based key derivation (RFC 5869) with the HPKE labeled variants.

use hkdf::Hkdf;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// HPKE KDF identifiers (RFC 9180 §7.2), restricted to the algorithms the
/// MLS ciphersuites use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KdfId {
    /// HKDF-SHA256
    HkdfSha256 = 0x0001,
    /// HKDF-SHA512
    HkdfSha512 = 0x0003,
}

impl KdfId {
    /// Look up a KDF by its registry code.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for codes outside the supported set.
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            0x0001 => Ok(Self::HkdfSha256),
            0x0003 => Ok(Self::HkdfSha512),
            _ => Err(Error::InvalidParameter("unsupported KDF code")),
        }
    }

    /// Registry code for the wire.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Hash output size in bytes (`Nh`).
    pub const fn output_size(self) -> usize {
        match self {
            Self::HkdfSha256 => 32,
            Self::HkdfSha512 => 64,
        }
    }

    /// `HKDF-Extract(salt, ikm)`: derive a pseudorandom key of `Nh` bytes.
    ///
    /// An empty salt is equivalent to the RFC 5869 default of `Nh` zero
    /// bytes.
    pub fn extract(self, salt: &[u8], ikm: &[u8]) -> Zeroizing<Vec<u8>> {
        let prk = match self {
            Self::HkdfSha256 => Hkdf::<Sha256>::extract(Some(salt), ikm).0.to_vec(),
            Self::HkdfSha512 => Hkdf::<Sha512>::extract(Some(salt), ikm).0.to_vec(),
        };
        Zeroizing::new(prk)
    }

    /// `HKDF-Expand(prk, info, L)`: expand a pseudorandom key into `length`
    /// bytes of output keying material.
    ///
    /// # Errors
    ///
    /// `KeyDerivation` when `prk` is shorter than `Nh` or `length` exceeds
    /// the RFC 5869 maximum of `255 * Nh`.
    pub fn expand(self, prk: &[u8], info: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>> {
        let mut okm = Zeroizing::new(vec![0u8; length]);
        let expanded = match self {
            Self::HkdfSha256 => Hkdf::<Sha256>::from_prk(prk)
                .map_err(|_| Error::KeyDerivation("PRK shorter than the hash output"))?
                .expand(info, &mut okm),
            Self::HkdfSha512 => Hkdf::<Sha512>::from_prk(prk)
                .map_err(|_| Error::KeyDerivation("PRK shorter than the hash output"))?
                .expand(info, &mut okm),
        };
        expanded.map_err(|_| Error::KeyDerivation("output length exceeds 255 * Nh"))?;
        Ok(okm)
    }

    /// `LabeledExtract(salt, label, ikm)` per RFC 9180 §4, under the
    /// caller's `suite_id` domain.
    pub fn labeled_extract(
        self,
        suite_id: &[u8],
        salt: &[u8],
        label: &str,
        ikm: &[u8],
    ) -> Zeroizing<Vec<u8>> {
        let labeled_ikm = [b"HPKE-v1", suite_id, label.as_bytes(), ikm].concat();
        self.extract(salt, &labeled_ikm)
    }

    /// `LabeledExpand(prk, label, info, L)` per RFC 9180 §4, under the
    /// caller's `suite_id` domain.
    ///
    /// # Errors
    ///
    /// See [`expand`](Self::expand).
    pub fn labeled_expand(
        self,
        suite_id: &[u8],
        prk: &[u8],
        label: &str,
        info: &[u8],
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let length16 =
            u16::try_from(length).map_err(|_| Error::KeyDerivation("output length exceeds u16"))?;
        let labeled_info = [
            &length16.to_be_bytes(),
            b"HPKE-v1".as_slice(),
            suite_id,
            label.as_bytes(),
            info,
        ]
        .concat();
        self.expand(prk, &labeled_info, length)
    }
}
