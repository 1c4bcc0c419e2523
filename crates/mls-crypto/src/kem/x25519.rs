//! X25519 Diffie-Hellman (RFC 7748) for DHKEM(X25519, HKDF-SHA256).

use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kem::KemKeyPair;

pub(super) fn generate() -> Result<KemKeyPair> {
    let secret = StaticSecret::random_from_rng(rand::rngs::OsRng);
    let public = PublicKey::from(&secret);
    Ok(KemKeyPair {
        private: Zeroizing::new(secret.to_bytes().to_vec()),
        public: public.as_bytes().to_vec(),
    })
}

pub(super) fn public_from_private(private: &[u8]) -> Result<Vec<u8>> {
    let scalar: [u8; 32] = private
        .try_into()
        .map_err(|_| Error::InvalidParameter("X25519 private key length"))?;
    let secret = StaticSecret::from(scalar);
    Ok(PublicKey::from(&secret).as_bytes().to_vec())
}

pub(super) fn parse_public(public: &[u8]) -> Result<Vec<u8>> {
    let point: [u8; 32] = public
        .try_into()
        .map_err(|_| Error::InvalidParameter("X25519 public key length"))?;
    Ok(point.to_vec())
}

pub(super) fn dh(private: &[u8], public: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let scalar: [u8; 32] = private
        .try_into()
        .map_err(|_| Error::InvalidParameter("X25519 private key length"))?;
    let point: [u8; 32] = public
        .try_into()
        .map_err(|_| Error::InvalidParameter("X25519 public key length"))?;

    let secret = StaticSecret::from(scalar);
    let shared = secret.diffie_hellman(&PublicKey::from(point));

    // All-zero output marks a low-order peer point.
    if shared.as_bytes() == &[0u8; 32] {
        return Err(Error::InvalidParameter("X25519 low-order public key"));
    }

    Ok(Zeroizing::new(shared.as_bytes().to_vec()))
}
