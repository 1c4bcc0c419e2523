//! Cryptographic core for the Messaging Layer Security (MLS) protocol.
//!
//! This crate implements the primitive layer the higher MLS machinery is
//! built on:
//! - Ciphersuite registry: the six MLS v1 suites behind one value type
//! - Primitive families (KEM, KDF, AEAD, hash, signature) as closed ID
//!   enums with uniform operations
//! - HPKE base mode (RFC 9180) for single-shot encryption and secret
//!   export
//! - MLS-labelled signing over the `SignContent` envelope
//! - `ExpandWithLabel` / `DeriveSecret` and the 16-byte reference
//!   derivation for key packages and proposals
//!
//! All secrets are wrapped in `Zeroizing`, private-key comparison is
//! constant time, and no key material is ever logged.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aead;
pub mod digest;
pub mod error;
pub mod hpke;
pub mod kdf;
pub mod kem;
pub mod keys;
pub mod sig;
pub mod suite;

pub use error::{Error, Result};
pub use keys::{
    sign_label, HpkeCiphertext, HpkePrivateKey, HpkePublicKey, SignaturePrivateKey,
    SignaturePublicKey,
};
pub use sig::SignatureScheme;
pub use suite::{CipherSuite, ALL_SUPPORTED_SUITES};
