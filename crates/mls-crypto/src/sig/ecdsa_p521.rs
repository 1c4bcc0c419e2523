//! ECDSA over NIST P-521 with SHA-512.
//!
//! Private keys are 66-byte big-endian scalars, public keys uncompressed
//! SEC1 points, signatures DER-encoded.

use p521::ecdsa::signature::{Signer, Verifier};
use p521::ecdsa::{Signature, SigningKey, VerifyingKey};
use p521::elliptic_curve::sec1::ToEncodedPoint;
use p521::SecretKey;
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
        .map_err(|_| Error::InvalidParameter("P-521 private key"))?;
    Ok(secret.public_key().to_encoded_point(false).as_bytes().to_vec())
}

pub(super) fn sign(message: &[u8], private: &[u8]) -> Result<Vec<u8>> {
    let signing = SigningKey::from_slice(private)
        .map_err(|_| Error::InvalidParameter("P-521 private key"))?;
    let signature: Signature = signing.sign(message);
    Ok(signature.to_der().as_bytes().to_vec())
}

pub(super) fn verify(message: &[u8], signature: &[u8], public: &[u8]) -> Result<bool> {
    let verifying = VerifyingKey::from_sec1_bytes(public)
        .map_err(|_| Error::InvalidParameter("P-521 public key"))?;

    let Ok(signature) = Signature::from_der(signature) else {
        return Ok(false);
    };
    Ok(verifying.verify(message, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_public_recompute() {
        let pair = generate().unwrap();
        assert_eq!(public_from_private(&pair.private).unwrap(), pair.public);

        let signature = sign(b"message", &pair.private).unwrap();
        assert!(verify(b"message", &signature, &pair.public).unwrap());
        assert!(!verify(b"messagf", &signature, &pair.public).unwrap());
    }
}
