//! Ed25519 signing (RFC 8032).
//!
//! Private keys are 32-byte seeds, public keys 32-byte compressed points,
//! signatures 64 raw bytes.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
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
    let seed: [u8; 32] = private
        .try_into()
        .map_err(|_| Error::InvalidParameter("Ed25519 private key length"))?;
    Ok(SigningKey::from_bytes(&seed))
}

pub(super) fn public_from_private(private: &[u8]) -> Result<Vec<u8>> {
    Ok(signing_key(private)?.verifying_key().to_bytes().to_vec())
}

pub(super) fn sign(message: &[u8], private: &[u8]) -> Result<Vec<u8>> {
    let signing = signing_key(private)?;
    Ok(signing.sign(message).to_bytes().to_vec())
}

pub(super) fn verify(message: &[u8], signature: &[u8], public: &[u8]) -> Result<bool> {
    let point: [u8; 32] = public
        .try_into()
        .map_err(|_| Error::InvalidParameter("Ed25519 public key length"))?;
    let verifying = VerifyingKey::from_bytes(&point)
        .map_err(|_| Error::InvalidParameter("Ed25519 public key"))?;

    let Ok(signature) = Signature::from_slice(signature) else {
        return Ok(false);
    };
    Ok(verifying.verify(message, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 8032 §7.1 test 2 (one-octet message).
    #[test]
    fn test_rfc8032_vector() {
        let private =
            hex::decode("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb")
                .unwrap();
        let expected_public =
            hex::decode("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c")
                .unwrap();
        let message = hex::decode("72").unwrap();
        let expected_signature = hex::decode(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
             085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        )
        .unwrap();

        assert_eq!(public_from_private(&private).unwrap(), expected_public);
        let signature = sign(&message, &private).unwrap();
        assert_eq!(signature, expected_signature);
        assert!(verify(&message, &signature, &expected_public).unwrap());
    }
}
