//! ECDSA over NIST P-256 with SHA-256.
//!
//! Private keys are 32-byte big-endian scalars, public keys uncompressed
//! SEC1 points, signatures DER-encoded.

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::SecretKey;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::sig::SignatureKeyPair;

pub(super) fn generate() -> Result<SignatureKeyPair> {
    let secret = SecretKey::random(&mut rand::rngs::OsRng);
    Ok(SignatureKeyPair {
        private: Zeroizing::new(secret.to_bytes().to_vec()),
        public: secret.public_key().to_encoded_point(false).as_bytes().to_vec(),
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

pub(super) fn sign(message: &[u8], private: &[u8]) -> Result<Vec<u8>> {
    let signing = SigningKey::from_slice(private)
        .map_err(|_| Error::InvalidParameter("P-256 private key"))?;
    let signature: Signature = signing.sign(message);
    Ok(signature.to_der().as_bytes().to_vec())
}

pub(super) fn verify(message: &[u8], signature: &[u8], public: &[u8]) -> Result<bool> {
    let verifying = VerifyingKey::from_sec1_bytes(public)
        .map_err(|_| Error::InvalidParameter("P-256 public key"))?;

    let Ok(signature) = Signature::from_der(signature) else {
        return Ok(false);
    };
    Ok(verifying.verify(message, &signature).is_ok())
}
