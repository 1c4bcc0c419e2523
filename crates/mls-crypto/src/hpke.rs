//! HPKE base mode (RFC 9180, mode 0).
//!
//! ```text
//! def SetupBaseS(pkR, info):
//!   shared_secret, enc = Encap(pkR)
//!   return enc, KeyScheduleS(mode_base, shared_secret, info,
//!                            default_psk, default_psk_id)
//!
//! def SetupBaseR(enc, skR, info):
//!   shared_secret = Decap(enc, skR)
//!   return KeyScheduleR(mode_base, shared_secret, info,
//!                       default_psk, default_psk_id)
//! ```
//!
//! The other HPKE modes (PSK, Auth, AuthPSK) are not part of the MLS
//! surface and are not implemented.

use zeroize::Zeroizing;

use crate::aead::AeadId;
use crate::error::{Error, Result};
use crate::kdf::KdfId;
use crate::kem::KemId;

/// `mode_base` (RFC 9180 §5.1).
const MODE_BASE: u8 = 0x00;

/// An HPKE configuration: the (KEM, KDF, AEAD) triple of a ciphersuite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hpke {
    /// KEM algorithm.
    pub kem: KemId,
    /// KDF algorithm.
    pub kdf: KdfId,
    /// AEAD algorithm.
    pub aead: AeadId,
}

impl Hpke {
    /// Assemble an HPKE configuration.
    pub const fn new(kem: KemId, kdf: KdfId, aead: AeadId) -> Self {
        Self { kem, kdf, aead }
    }

    /// `suite_id = concat("HPKE", kem_id, kdf_id, aead_id)` (RFC 9180 §5.1).
    pub fn suite_id(&self) -> [u8; 10] {
        let mut suite_id = [0u8; 10];
        suite_id[0..4].copy_from_slice(b"HPKE");
        suite_id[4..6].copy_from_slice(&self.kem.code().to_be_bytes());
        suite_id[6..8].copy_from_slice(&self.kdf.code().to_be_bytes());
        suite_id[8..10].copy_from_slice(&self.aead.code().to_be_bytes());
        suite_id
    }

    /// `SetupBaseS(pkR, info)`: encapsulate to `pk_r` and derive a send
    /// context.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on a malformed recipient key.
    pub fn setup_base_s(&self, pk_r: &[u8], info: &[u8]) -> Result<(Vec<u8>, Context)> {
        let (enc, shared_secret) = self.kem.encap(pk_r)?;
        let context = self.key_schedule_base(&shared_secret, info)?;
        Ok((enc, context))
    }

    /// `SetupBaseR(enc, skR, info)`: decapsulate `enc` and derive the
    /// matching receive context.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on a malformed encapsulation or private key.
    pub fn setup_base_r(&self, enc: &[u8], sk_r: &[u8], info: &[u8]) -> Result<Context> {
        let shared_secret = self.kem.decap(enc, sk_r)?;
        self.key_schedule_base(&shared_secret, info)
    }

    /// `KeySchedule(mode_base, shared_secret, info, "", "")` (RFC 9180
    /// §5.1). The PSK inputs are fixed to their defaults in base mode.
    fn key_schedule_base(&self, shared_secret: &[u8], info: &[u8]) -> Result<Context> {
        let suite_id = self.suite_id();

        let psk_id_hash = self.kdf.labeled_extract(&suite_id, &[], "psk_id_hash", &[]);
        let info_hash = self.kdf.labeled_extract(&suite_id, &[], "info_hash", info);
        let key_schedule_context = [
            [MODE_BASE].as_slice(),
            psk_id_hash.as_slice(),
            info_hash.as_slice(),
        ]
        .concat();

        let secret = self.kdf.labeled_extract(&suite_id, shared_secret, "secret", &[]);

        let key = self.kdf.labeled_expand(
            &suite_id,
            &secret,
            "key",
            &key_schedule_context,
            self.aead.key_size(),
        )?;
        let base_nonce = self.kdf.labeled_expand(
            &suite_id,
            &secret,
            "base_nonce",
            &key_schedule_context,
            self.aead.nonce_size(),
        )?;
        let exporter_secret = self.kdf.labeled_expand(
            &suite_id,
            &secret,
            "exp",
            &key_schedule_context,
            self.kdf.output_size(),
        )?;

        Ok(Context {
            aead: self.aead,
            kdf: self.kdf,
            suite_id,
            key,
            base_nonce: base_nonce.to_vec(),
            seq: 0,
            exporter_secret,
        })
    }
}

/// An HPKE encryption context.
///
/// Holds `(key, base_nonce, seq, exporter_secret)`. The sequence counter
/// advances on every seal/open; MLS uses each context single-shot, so the
/// counter stays at zero in practice.
pub struct Context {
    aead: AeadId,
    kdf: KdfId,
    suite_id: [u8; 10],
    key: Zeroizing<Vec<u8>>,
    base_nonce: Vec<u8>,
    seq: u64,
    exporter_secret: Zeroizing<Vec<u8>>,
}

impl Context {
    /// `Context.Seal(aad, pt)`: encrypt under the current sequence nonce.
    ///
    /// # Errors
    ///
    /// `MessageLimitReached` once the counter is exhausted.
    pub fn seal(&mut self, aad: &[u8], pt: &[u8]) -> Result<Vec<u8>> {
        let nonce = self.compute_nonce();
        let ct = self.aead.seal(&self.key, &nonce, aad, pt)?;
        self.increment_seq()?;
        Ok(ct)
    }

    /// `Context.Open(aad, ct)`: decrypt under the current sequence nonce.
    ///
    /// # Errors
    ///
    /// `HpkeDecryption` on tag mismatch; `MessageLimitReached` once the
    /// counter is exhausted.
    pub fn open(&mut self, aad: &[u8], ct: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let nonce = self.compute_nonce();
        let pt = self.aead.open(&self.key, &nonce, aad, ct)?;
        self.increment_seq()?;
        Ok(pt)
    }

    /// `Context.Export(exporter_context, L)` (RFC 9180 §5.3).
    ///
    /// # Errors
    ///
    /// `KeyDerivation` when `length` is out of range for the KDF.
    pub fn export(&self, exporter_context: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>> {
        self.kdf.labeled_expand(
            &self.suite_id,
            &self.exporter_secret,
            "sec",
            exporter_context,
            length,
        )
    }

    /// `ComputeNonce(seq)`: XOR the big-endian sequence number into the
    /// low-order bytes of the base nonce.
    fn compute_nonce(&self) -> Vec<u8> {
        let mut nonce = self.base_nonce.clone();
        for (n, s) in nonce.iter_mut().rev().zip(self.seq.to_be_bytes().iter().rev()) {
            *n ^= s;
        }
        nonce
    }

    fn increment_seq(&mut self) -> Result<()> {
        self.seq = self.seq.checked_add(1).ok_or(Error::MessageLimitReached)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a1_suite() -> Hpke {
        Hpke::new(KemId::DhKemX25519HkdfSha256, KdfId::HkdfSha256, AeadId::Aes128Gcm)
    }

    /// RFC 9180 A.1: receive-side setup and secret export.
    #[test]
    fn test_rfc9180_a1_setup_and_export() {
        let ikm_r =
            hex::decode("6db9df30aa07dd42ee5e8181afdb977e538f5e1fec8a06223f33f7013e525037")
                .unwrap();
        let enc = hex::decode("37fda3567bdbd628e88668c3c8d7e97d1d1253b6d4ea6d44c150f741f1bf4431")
            .unwrap();
        let info = hex::decode("4f6465206f6e2061204772656369616e2055726e").unwrap();

        let pair = KemId::DhKemX25519HkdfSha256.derive_key_pair(&ikm_r).unwrap();
        assert_eq!(
            hex::encode(&pair.public),
            "3948cfe0ad1ddb695d780e59077195da6c56506b027329794ab02bca80815c4d"
        );

        let context = a1_suite().setup_base_r(&enc, &pair.private, &info).unwrap();
        assert_eq!(
            hex::encode(&*context.export(&[], 32).unwrap()),
            "3853fe2b4035195a573ffc53856e77058e15d9ea064de3e59f4961d0095250ee"
        );
        assert_eq!(
            hex::encode(&*context.export(&[0x00], 32).unwrap()),
            "2e8f0b54673c7029649d4eb9d5e33bf1872cf76d623ff164ac185da9e88c21a5"
        );
        assert_eq!(
            hex::encode(&*context.export(b"TestContext", 32).unwrap()),
            "e9e43065102c3836401bed8c3c3c75ae46be1639869391d62c61f1ec7af54931"
        );
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let suite = a1_suite();
        let pair = suite.kem.generate_key_pair().unwrap();

        let (enc, mut sender) = suite.setup_base_s(&pair.public, b"info").unwrap();
        let ct = sender.seal(b"aad", b"hello hpke").unwrap();

        let mut receiver = suite.setup_base_r(&enc, &pair.private, b"info").unwrap();
        let pt = receiver.open(b"aad", &ct).unwrap();
        assert_eq!(&*pt, b"hello hpke");
    }

    #[test]
    fn test_sequence_advances_nonce() {
        let suite = a1_suite();
        let pair = suite.kem.generate_key_pair().unwrap();

        let (enc, mut sender) = suite.setup_base_s(&pair.public, b"").unwrap();
        let ct0 = sender.seal(b"", b"message").unwrap();
        let ct1 = sender.seal(b"", b"message").unwrap();
        assert_ne!(ct0, ct1);

        let mut receiver = suite.setup_base_r(&enc, &pair.private, b"").unwrap();
        assert_eq!(&*receiver.open(b"", &ct0).unwrap(), b"message");
        assert_eq!(&*receiver.open(b"", &ct1).unwrap(), b"message");
    }

    #[test]
    fn test_wrong_info_fails_open() {
        let suite = a1_suite();
        let pair = suite.kem.generate_key_pair().unwrap();

        let (enc, mut sender) = suite.setup_base_s(&pair.public, b"info A").unwrap();
        let ct = sender.seal(b"", b"message").unwrap();

        let mut receiver = suite.setup_base_r(&enc, &pair.private, b"info B").unwrap();
        assert!(matches!(receiver.open(b"", &ct), Err(Error::HpkeDecryption)));
    }

    #[test]
    fn test_export_agreement() {
        let suite = a1_suite();
        let pair = suite.kem.generate_key_pair().unwrap();

        let (enc, sender) = suite.setup_base_s(&pair.public, b"info").unwrap();
        let receiver = suite.setup_base_r(&enc, &pair.private, b"info").unwrap();

        let e_s = sender.export(b"context", 48).unwrap();
        let e_r = receiver.export(b"context", 48).unwrap();
        assert_eq!(&*e_s, &*e_r);
        assert_eq!(e_s.len(), 48);
    }
}
