//! ECDH over NIST P-256 (secp256r1) for DHKEM(P-256, HKDF-SHA256).
//!
//! Public keys are uncompressed SEC1 points (0x04 || x || y); private keys
//! are 32-byte big-endian field elements.

use p256::ecdh::diffie_hellman;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{PublicKey, SecretKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kem::KemKeyPair;

pub(super) fn generate() -> Result<KemKeyPair> {
    let secret = SecretKey::random(&mut rand::rngs::OsRng);
    let public = secret.public_key().to_encoded_point(false);
    Ok(KemKeyPair {
        private: Zeroizing::new(secret.to_bytes().to_vec()),
        public: public.as_bytes().to_vec(),
    })
}

pub(super) fn is_valid_scalar(candidate: &[u8]) -> bool {
    SecretKey::from_slice(candidate).is_ok()
}

pub(super) fn public_from_private(private: &[u8]) -> Result<Vec<u8>> {
    let secret = SecretKey::from_slice(private)
        .map_err(|_| Error::InvalidParameter("P-256 private key"))?;
    Ok(secret.public_key().to_encoded_point(false).as_bytes().to_vec())
}

pub(super) fn parse_public(public: &[u8]) -> Result<Vec<u8>> {
    let point = PublicKey::from_sec1_bytes(public)
        .map_err(|_| Error::InvalidParameter("P-256 public key"))?;
    Ok(point.to_encoded_point(false).as_bytes().to_vec())
}

pub(super) fn dh(private: &[u8], public: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let secret = SecretKey::from_slice(private)
        .map_err(|_| Error::InvalidParameter("P-256 private key"))?;
    let point = PublicKey::from_sec1_bytes(public)
        .map_err(|_| Error::InvalidParameter("P-256 public key"))?;

    let shared = diffie_hellman(secret.to_nonzero_scalar(), point.as_affine());
    Ok(Zeroizing::new(shared.raw_secret_bytes().to_vec()))
}
