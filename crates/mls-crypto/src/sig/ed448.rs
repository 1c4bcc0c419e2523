//! Ed448 signing (RFC 8032).
//!
//! Private keys are 57-byte seeds, public keys 57-byte compressed points,
//! signatures 114 raw bytes.

use ed448_goldilocks_plus::{Signature, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::sig::SignatureKeyPair;

pub(super) fn generate() -> Result<SignatureKeyPair> {
    let signing = SigningKey::generate(&mut rand::rngs::OsRng);
    Ok(SignatureKeyPair {
        private: Zeroizing::new(signing.to_bytes().to_vec()),
        public: signing.verifying_key().to_bytes().to_vec(),
    })
}

fn signing_key(private: &[u8]) -> Result<SigningKey> {
    SigningKey::try_from(private).map_err(|_| Error::InvalidParameter("Ed448 private key"))
}

pub(super) fn public_from_private(private: &[u8]) -> Result<Vec<u8>> {
    Ok(signing_key(private)?.verifying_key().to_bytes().to_vec())
}

pub(super) fn sign(message: &[u8], private: &[u8]) -> Result<Vec<u8>> {
    let signing = signing_key(private)?;
    let signature = signing
        .sign_raw(message)
        .map_err(|_| Error::InvalidParameter("Ed448 signing"))?;
    Ok(signature.to_bytes().to_vec())
}

pub(super) fn verify(message: &[u8], signature: &[u8], public: &[u8]) -> Result<bool> {
    let Ok(public_bytes) = <[u8; 57]>::try_from(public) else {
        return Err(Error::InvalidParameter("Ed448 public key"));
    };
    let verifying = VerifyingKey::from_bytes(&public_bytes)
        .map_err(|_| Error::InvalidParameter("Ed448 public key"))?;

    let Ok(signature) = Signature::try_from(signature) else {
        return Ok(false);
    };
    Ok(verifying.verify_raw(&signature, message).is_ok())
}
