//! X448 Diffie-Hellman (RFC 7748) for DHKEM(X448, HKDF-SHA512).

use x448::{PublicKey, Secret};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kem::KemKeyPair;

pub(super) fn generate() -> Result<KemKeyPair> {
    let secret = Secret::new(&mut rand_core_x448::OsRng);
    let public = PublicKey::from(&secret);
    Ok(KemKeyPair {
        private: Zeroizing::new(secret.as_bytes().to_vec()),
        public: public.as_bytes().to_vec(),
    })
}

pub(super) fn public_from_private(private: &[u8]) -> Result<Vec<u8>> {
    let secret = Secret::from_bytes(private)
        .ok_or(Error::InvalidParameter("X448 private key length"))?;
    Ok(PublicKey::from(&secret).as_bytes().to_vec())
}

pub(super) fn parse_public(public: &[u8]) -> Result<Vec<u8>> {
    let point =
        PublicKey::from_bytes(public).ok_or(Error::InvalidParameter("X448 public key"))?;
    Ok(point.as_bytes().to_vec())
}

pub(super) fn dh(private: &[u8], public: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let secret = Secret::from_bytes(private)
        .ok_or(Error::InvalidParameter("X448 private key length"))?;
    let point =
        PublicKey::from_bytes(public).ok_or(Error::InvalidParameter("X448 public key"))?;

    // Returns None for a low-order peer point.
    let shared = secret
        .as_diffie_hellman(&point)
        .ok_or(Error::InvalidParameter("X448 low-order public key"))?;

    Ok(Zeroizing::new(shared.as_bytes().to_vec()))
}
