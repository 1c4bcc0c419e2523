//! Hash functions used by the MLS ciphersuites.

use sha2::{Digest, Sha256, Sha512};

/// Hash algorithms, one per supported ciphersuite family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestId {
    /// SHA-256 (FIPS 180-4).
    Sha256,
    /// SHA-512 (FIPS 180-4).
    Sha512,
}

impl DigestId {
    /// Digest output size in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Hash `data` and return the digest.
    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}
