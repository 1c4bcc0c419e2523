//! Signature algorithms used by the MLS ciphersuites.
//!
//! EdDSA (Ed25519, Ed448) and ECDSA (P-256/SHA-256, P-521/SHA-512). ECDSA
//! signatures travel DER-encoded; EdDSA signatures are raw. Public keys are
//! raw points for EdDSA and uncompressed SEC1 points for ECDSA.

mod ecdsa_p256;
mod ecdsa_p521;
mod ed25519;
mod ed448;

use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kdf::KdfId;

/// Signature algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureId {
    /// Ed25519 (RFC 8032).
    Ed25519,
    /// Ed448 (RFC 8032).
    Ed448,
    /// ECDSA over P-256 with SHA-256.
    EcdsaP256Sha256,
    /// ECDSA over P-521 with SHA-512.
    EcdsaP521Sha512,
}

/// TLS `SignatureScheme` registry codes carried in MLS credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SignatureScheme {
    /// ecdsa_secp256r1_sha256
    EcdsaSecp256r1Sha256 = 0x0403,
    /// ecdsa_secp521r1_sha512
    EcdsaSecp521r1Sha512 = 0x0603,
    /// ed25519
    Ed25519 = 0x0807,
    /// ed448
    Ed448 = 0x0808,
}

impl SignatureScheme {
    /// Registry code for the wire.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Look up a scheme by its registry code.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for codes outside the supported set.
    pub fn from_code(code: u16) -> Result<Self> {
        match code {
            0x0403 => Ok(Self::EcdsaSecp256r1Sha256),
            0x0603 => Ok(Self::EcdsaSecp521r1Sha512),
            0x0807 => Ok(Self::Ed25519),
            0x0808 => Ok(Self::Ed448),
            _ => Err(Error::InvalidParameter("unsupported signature scheme")),
        }
    }
}

/// A signature key pair in serialized form.
///
/// The private half is zeroized on drop.
pub struct SignatureKeyPair {
    /// Serialized private key.
    pub private: Zeroizing<Vec<u8>>,
    /// Serialized public key.
    pub public: Vec<u8>,
}

impl SignatureId {
    /// The TLS signature scheme this algorithm signs under.
    pub const fn scheme(self) -> SignatureScheme {
        match self {
            Self::Ed25519 => SignatureScheme::Ed25519,
            Self::Ed448 => SignatureScheme::Ed448,
            Self::EcdsaP256Sha256 => SignatureScheme::EcdsaSecp256r1Sha256,
            Self::EcdsaP521Sha512 => SignatureScheme::EcdsaSecp521r1Sha512,
        }
    }

    /// Serialized private key size in bytes.
    pub const fn n_sk(self) -> usize {
        match self {
            Self::Ed25519 => 32,
            Self::Ed448 => 57,
            Self::EcdsaP256Sha256 => 32,
            Self::EcdsaP521Sha512 => 66,
        }
    }

    /// Serialized public key size in bytes.
    pub const fn n_pk(self) -> usize {
        match self {
            Self::Ed25519 => 32,
            Self::Ed448 => 57,
            Self::EcdsaP256Sha256 => 65,
            Self::EcdsaP521Sha512 => 133,
        }
    }

    /// Generate a fresh key pair from the system RNG.
    ///
    /// # Errors
    ///
    /// Propagated from the curve backend; does not fail under normal
    /// circumstances.
    pub fn generate_key_pair(self) -> Result<SignatureKeyPair> {
        match self {
            Self::Ed25519 => ed25519::generate(),
            Self::Ed448 => ed448::generate(),
            Self::EcdsaP256Sha256 => ecdsa_p256::generate(),
            Self::EcdsaP521Sha512 => ecdsa_p521::generate(),
        }
    }

    /// Derive a key pair deterministically from input keying material.
    ///
    /// Uses the DHKEM DeriveKeyPair construction under a
    /// `"SIG" || scheme-code` domain: EdDSA scalars come straight out of
    /// `LabeledExpand`, ECDSA scalars by candidate rejection sampling.
    ///
    /// # Errors
    ///
    /// `KeyDerivation` if rejection sampling exhausts its candidates.
    pub fn derive_key_pair(self, ikm: &[u8]) -> Result<SignatureKeyPair> {
        let kdf = self.kdf();
        let suite_id = self.suite_id();
        let dkp_prk = kdf.labeled_extract(&suite_id, &[], "dkp_prk", ikm);

        let private = match self {
            Self::Ed25519 | Self::Ed448 => {
                kdf.labeled_expand(&suite_id, &dkp_prk, "sk", &[], self.n_sk())?
            }
            Self::EcdsaP256Sha256 => {
                self.sample_scalar(&dkp_prk, 0xff, ecdsa_p256::is_valid_scalar)?
            }
            Self::EcdsaP521Sha512 => {
                self.sample_scalar(&dkp_prk, 0x01, ecdsa_p521::is_valid_scalar)?
            }
        };

        let public = self.public_from_private(&private)?;
        Ok(SignatureKeyPair { private, public })
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
    /// `InvalidParameter` on malformed private key bytes.
    pub fn public_from_private(self, private: &[u8]) -> Result<Vec<u8>> {
        if private.len() != self.n_sk() {
            return Err(Error::InvalidParameter("signature private key length"));
        }
        match self {
            Self::Ed25519 => ed25519::public_from_private(private),
            Self::Ed448 => ed448::public_from_private(private),
            Self::EcdsaP256Sha256 => ecdsa_p256::public_from_private(private),
            Self::EcdsaP521Sha512 => ecdsa_p521::public_from_private(private),
        }
    }

    /// Deserialize and validate a private key, recomputing its public half.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on malformed private key bytes.
    pub fn parse_private(self, private: &[u8]) -> Result<SignatureKeyPair> {
        let public = self.public_from_private(private)?;
        Ok(SignatureKeyPair {
            private: Zeroizing::new(private.to_vec()),
            public,
        })
    }

    /// Sign `message` with a serialized private key.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on malformed private key bytes.
    pub fn sign(self, message: &[u8], private: &[u8]) -> Result<Vec<u8>> {
        if private.len() != self.n_sk() {
            return Err(Error::InvalidParameter("signature private key length"));
        }
        match self {
            Self::Ed25519 => ed25519::sign(message, private),
            Self::Ed448 => ed448::sign(message, private),
            Self::EcdsaP256Sha256 => ecdsa_p256::sign(message, private),
            Self::EcdsaP521Sha512 => ecdsa_p521::sign(message, private),
        }
    }

    /// Verify `signature` over `message` with a serialized public key.
    ///
    /// Returns `Ok(false)` for a signature that does not verify (including
    /// a structurally malformed one); errors are reserved for malformed
    /// public keys.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on malformed public key bytes.
    pub fn verify(self, message: &[u8], signature: &[u8], public: &[u8]) -> Result<bool> {
        if public.len() != self.n_pk() {
            return Err(Error::InvalidParameter("signature public key length"));
        }
        match self {
            Self::Ed25519 => ed25519::verify(message, signature, public),
            Self::Ed448 => ed448::verify(message, signature, public),
            Self::EcdsaP256Sha256 => ecdsa_p256::verify(message, signature, public),
            Self::EcdsaP521Sha512 => ecdsa_p521::verify(message, signature, public),
        }
    }

    const fn kdf(self) -> KdfId {
        match self {
            Self::Ed25519 | Self::EcdsaP256Sha256 => KdfId::HkdfSha256,
            Self::Ed448 | Self::EcdsaP521Sha512 => KdfId::HkdfSha512,
        }
    }

    fn suite_id(self) -> [u8; 5] {
        let mut suite_id = [0u8; 5];
        suite_id[0..3].copy_from_slice(b"SIG");
        suite_id[3..5].copy_from_slice(&self.scheme().code().to_be_bytes());
        suite_id
    }
}

/// All signature algorithms referenced by the supported ciphersuites.
pub const ALL_SIGNATURES: [SignatureId; 4] = [
    SignatureId::Ed25519,
    SignatureId::Ed448,
    SignatureId::EcdsaP256Sha256,
    SignatureId::EcdsaP521Sha512,
];
