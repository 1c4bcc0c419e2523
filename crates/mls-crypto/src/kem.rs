//! DHKEM key encapsulation (RFC 9180 §4.1) over the four curves the MLS
//! ciphersuites use.
//!
//! Key material crosses this module boundary in serialized form: raw
//! scalars/points for the X-curves, big-endian field elements and
//! uncompressed SEC1 points for the NIST curves.

mod p256;
mod p521;
mod x25519;
mod x448;

use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kdf::KdfId;

/// HPKE KEM identifiers (RFC 9180 §7.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KemId {
    /// DHKEM(P-256, HKDF-SHA256)
    DhKemP256HkdfSha256 = 0x0010,
    /// DHKEM(P-521, HKDF-SHA512)
    DhKemP521HkdfSha512 = 0x0012,
    /// DHKEM(X25519, HKDF-SHA256)
    DhKemX25519HkdfSha256 = 0x0020,
    /// DHKEM(X448, HKDF-SHA512)
    DhKemX448HkdfSha512 = 0x0021,
}

/// A KEM key pair in serialized form.
///
/// The private half is zeroized on drop; the public half is freely
/// cloneable.
pub struct KemKeyPair {
    /// Serialized private key (`Nsk` bytes).
    pub private: Zeroizing<Vec<u8>>,
    /// Serialized public key (`Npk` bytes).
    pub public: Vec<u8>,
}

impl KemId {
    /// Look up a KEM by its registry code.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for codes outside the supported set.
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            0x0010 => Ok(Self::DhKemP256HkdfSha256),
            0x0012 => Ok(Self::DhKemP521HkdfSha512),
            0x0020 => Ok(Self::DhKemX25519HkdfSha256),
            0x0021 => Ok(Self::DhKemX448HkdfSha512),
            _ => Err(Error::InvalidParameter("unsupported KEM code")),
        }
    }

    /// Registry code for the wire.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// The KDF the DHKEM composes internally.
    pub const fn kdf(self) -> KdfId {
        match self {
            Self::DhKemP256HkdfSha256 | Self::DhKemX25519HkdfSha256 => KdfId::HkdfSha256,
            Self::DhKemP521HkdfSha512 | Self::DhKemX448HkdfSha512 => KdfId::HkdfSha512,
        }
    }

    /// KEM shared secret size in bytes (`Nsecret`).
    pub const fn n_secret(self) -> usize {
        match self {
            Self::DhKemP256HkdfSha256 | Self::DhKemX25519HkdfSha256 => 32,
            Self::DhKemP521HkdfSha512 | Self::DhKemX448HkdfSha512 => 64,
        }
    }

    /// Encapsulation size in bytes (`Nenc`); equal to `Npk` for DHKEMs.
    pub const fn n_enc(self) -> usize {
        self.n_pk()
    }

    /// Serialized public key size in bytes (`Npk`).
    pub const fn n_pk(self) -> usize {
        match self {
            Self::DhKemP256HkdfSha256 => 65,
            Self::DhKemP521HkdfSha512 => 133,
            Self::DhKemX25519HkdfSha256 => 32,
            Self::DhKemX448HkdfSha512 => 56,
        }
    }

    /// Serialized private key size in bytes (`Nsk`).
    pub const fn n_sk(self) -> usize {
        match self {
            Self::DhKemP256HkdfSha256 => 32,
            Self::DhKemP521HkdfSha512 => 66,
            Self::DhKemX25519HkdfSha256 => 32,
            Self::DhKemX448HkdfSha512 => 56,
        }
    }

    /// `suite_id = concat("KEM", I2OSP(kem_id, 2))` (RFC 9180 §4.1).
    pub fn suite_id(self) -> [u8; 5] {
        let mut suite_id = [0u8; 5];
        suite_id[0..3].copy_from_slice(b"KEM");
        suite_id[3..5].copy_from_slice(&self.code().to_be_bytes());
        suite_id
    }

    /// `GenerateKeyPair()`: a fresh key pair from the system RNG.
    ///
    /// # Errors
    ///
    /// Propagated from the curve backend; does not fail under normal
    /// circumstances.
    pub fn generate_key_pair(self) -> Result<KemKeyPair> {
        match self {
            Self::DhKemP256HkdfSha256 => p256::generate(),
            Self::DhKemP521HkdfSha512 => p521::generate(),
            Self::DhKemX25519HkdfSha256 => x25519::generate(),
            Self::DhKemX448HkdfSha512 => x448::generate(),
        }
    }

    /// `DeriveKeyPair(ikm)` (RFC 9180 §7.1.3): a deterministic key pair
    /// from input keying material.
    ///
    /// X-curve scalars come straight out of `LabeledExpand`; NIST scalars
    /// are found by candidate rejection sampling with the per-curve
    /// bitmask.
    ///
    /// # Errors
    ///
    /// `KeyDerivation` if rejection sampling exhausts its 256 candidates.
    pub fn derive_key_pair(self, ikm: &[u8]) -> Result<KemKeyPair> {
        let kdf = self.kdf();
        let suite_id = self.suite_id();
        let dkp_prk = kdf.labeled_extract(&suite_id, &[], "dkp_prk", ikm);

        let private = match self {
            Self::DhKemX25519HkdfSha256 | Self::DhKemX448HkdfSha512 => {
                kdf.labeled_expand(&suite_id, &dkp_prk, "sk", &[], self.n_sk())?
            }
            Self::DhKemP256HkdfSha256 => {
                self.sample_scalar(&dkp_prk, 0xff, p256::is_valid_scalar)?
            }
            Self::DhKemP521HkdfSha512 => {
                self.sample_scalar(&dkp_prk, 0x01, p521::is_valid_scalar)?
            }
        };

        let public = self.public_from_private(&private)?;
        Ok(KemKeyPair { private, public })
    }

    fn sample_scalar(
        self,
        dkp_prk: &[u8],
        bitmask: u8,
        is_valid: fn(&[u8]) -> bool,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let kdf = self.kdf();
        let suite_id = self.suite_id();
        for counter in 0u8..=255 {
            let mut candidate =
                kdf.labeled_expand(&suite_id, dkp_prk, "candidate", &[counter], self.n_sk())?;
            candidate[0] &= bitmask;
            if is_valid(&candidate) {
                return Ok(candidate);
            }
        }
        Err(Error::KeyDerivation("rejection sampling exhausted"))
    }

    /// Recompute the serialized public key for a serialized private key.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on wrong length or an out-of-range scalar.
    pub fn public_from_private(self, private: &[u8]) -> Result<Vec<u8>> {
        if private.len() != self.n_sk() {
            return Err(Error::InvalidParameter("KEM private key length"));
        }
        match self {
            Self::DhKemP256HkdfSha256 => p256::public_from_private(private),
            Self::DhKemP521HkdfSha512 => p521::public_from_private(private),
            Self::DhKemX25519HkdfSha256 => x25519::public_from_private(private),
            Self::DhKemX448HkdfSha512 => x448::public_from_private(private),
        }
    }

    /// Deserialize and validate a public key, returning its canonical
    /// serialization.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the bytes do not decode to a curve point.
    pub fn parse_public(self, public: &[u8]) -> Result<Vec<u8>> {
        if public.len() != self.n_pk() {
            return Err(Error::InvalidParameter("KEM public key length"));
        }
        match self {
            Self::DhKemP256HkdfSha256 => p256::parse_public(public),
            Self::DhKemP521HkdfSha512 => p521::parse_public(public),
            Self::DhKemX25519HkdfSha256 => x25519::parse_public(public),
            Self::DhKemX448HkdfSha512 => x448::parse_public(public),
        }
    }

    /// Deserialize and validate a private key, recomputing its public half.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on malformed private key bytes.
    pub fn parse_private(self, private: &[u8]) -> Result<KemKeyPair> {
        let public = self.public_from_private(private)?;
        Ok(KemKeyPair {
            private: Zeroizing::new(private.to_vec()),
            public,
        })
    }

    /// `Encap(pkR)`: an ephemeral shared secret plus its encapsulation.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on a malformed recipient key.
    pub fn encap(self, pk_r: &[u8]) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        let pk_rm = self.parse_public(pk_r)?;
        let ephemeral = self.generate_key_pair()?;
        let dh = self.dh(&ephemeral.private, &pk_rm)?;

        let enc = ephemeral.public;
        let kem_context = [enc.as_slice(), pk_rm.as_slice()].concat();
        let shared = self.extract_and_expand(&dh, &kem_context)?;
        Ok((enc, shared))
    }

    /// `Decap(enc, skR)`: recover the shared secret from an encapsulation.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on a malformed encapsulation or private key.
    pub fn decap(self, enc: &[u8], sk_r: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let enc = self.parse_public(enc)?;
        let pk_rm = self.public_from_private(sk_r)?;
        let dh = self.dh(sk_r, &enc)?;

        let kem_context = [enc.as_slice(), pk_rm.as_slice()].concat();
        self.extract_and_expand(&dh, &kem_context)
    }

    fn dh(self, private: &[u8], public: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Self::DhKemP256HkdfSha256 => p256::dh(private, public),
            Self::DhKemP521HkdfSha512 => p521::dh(private, public),
            Self::DhKemX25519HkdfSha256 => x25519::dh(private, public),
            Self::DhKemX448HkdfSha512 => x448::dh(private, public),
        }
    }

    /// `ExtractAndExpand(dh, kem_context)` (RFC 9180 §4.1).
    fn extract_and_expand(self, dh: &[u8], kem_context: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let kdf = self.kdf();
        let suite_id = self.suite_id();
        let eae_prk = kdf.labeled_extract(&suite_id, &[], "eae_prk", dh);
        kdf.labeled_expand(&suite_id, &eae_prk, "shared_secret", kem_context, self.n_secret())
    }
}

/// All KEMs referenced by the supported ciphersuites.
pub const ALL_KEMS: [KemId; 4] = [
    KemId::DhKemP256HkdfSha256,
    KemId::DhKemP521HkdfSha512,
    KemId::DhKemX25519HkdfSha256,
    KemId::DhKemX448HkdfSha512,
];
