//! MLS ciphersuite registry and key-schedule helpers.
//!
//! A ciphersuite is a 16-bit registry code binding a KEM, KDF, AEAD, hash,
//! and signature algorithm. The six MLS v1 suites are supported; the
//! `Unknown` sentinel is the default-constructed state and every operation
//! on it fails.

use tracing::trace;
use zeroize::Zeroizing;

use mls_codec::{marshal, TlsSerialize, TlsSize, VLBytes};

use crate::aead::AeadId;
use crate::digest::DigestId;
use crate::error::{Error, Result};
use crate::hpke::Hpke;
use crate::kdf::KdfId;
use crate::kem::KemId;
use crate::sig::{SignatureId, SignatureScheme};

/// MLS ciphersuites, named as in the MLS v1 registry.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum CipherSuite {
    /// Sentinel for the default-constructed state; all operations fail.
    #[default]
    Unknown = 0x0000,
    /// DHKEM(X25519) + AES-128-GCM + SHA-256 + Ed25519
    X25519_AES128GCM_SHA256_Ed25519 = 0x0001,
    /// DHKEM(P-256) + AES-128-GCM + SHA-256 + ECDSA P-256
    P256_AES128GCM_SHA256_P256 = 0x0002,
    /// DHKEM(X25519) + ChaCha20-Poly1305 + SHA-256 + Ed25519
    X25519_CHACHA20POLY1305_SHA256_Ed25519 = 0x0003,
    /// DHKEM(X448) + AES-256-GCM + SHA-512 + Ed448
    X448_AES256GCM_SHA512_Ed448 = 0x0004,
    /// DHKEM(P-521) + AES-256-GCM + SHA-512 + ECDSA P-521
    P521_AES256GCM_SHA512_P521 = 0x0005,
    /// DHKEM(X448) + ChaCha20-Poly1305 + SHA-512 + Ed448
    X448_CHACHA20POLY1305_SHA512_Ed448 = 0x0006,
}

/// The primitive bundle behind a ciphersuite.
#[derive(Debug, Clone, Copy)]
pub struct Ciphers {
    /// HPKE configuration (KEM, KDF, AEAD).
    pub hpke: Hpke,
    /// Hash algorithm.
    pub digest: DigestId,
    /// Signature algorithm.
    pub signature: SignatureId,
}

/// All supported ciphersuites, in registry order.
pub const ALL_SUPPORTED_SUITES: [CipherSuite; 6] = [
    CipherSuite::X25519_AES128GCM_SHA256_Ed25519,
    CipherSuite::P256_AES128GCM_SHA256_P256,
    CipherSuite::X25519_CHACHA20POLY1305_SHA256_Ed25519,
    CipherSuite::X448_AES256GCM_SHA512_Ed448,
    CipherSuite::P521_AES256GCM_SHA512_P521,
    CipherSuite::X448_CHACHA20POLY1305_SHA512_Ed448,
];

/// References derived from key packages and authenticated content are
/// always 16 octets, independent of the KDF.
const REFERENCE_SIZE: usize = 16;

const KEY_PACKAGE_REFERENCE_LABEL: &[u8] = b"MLS 1.0 KeyPackage Reference";
const PROPOSAL_REFERENCE_LABEL: &[u8] = b"MLS 1.0 Proposal Reference";

/// The label structure fed to `ExpandWithLabel`.
#[derive(Debug, TlsSerialize, TlsSize)]
struct HkdfLabel {
    length: u16,
    label: VLBytes,
    context: VLBytes,
}

impl CipherSuite {
    /// Convert from the 16-bit wire code.
    ///
    /// Returns `None` for codes outside the registry; `0x0000` maps to
    /// [`CipherSuite::Unknown`].
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0000 => Some(Self::Unknown),
            0x0001 => Some(Self::X25519_AES128GCM_SHA256_Ed25519),
            0x0002 => Some(Self::P256_AES128GCM_SHA256_P256),
            0x0003 => Some(Self::X25519_CHACHA20POLY1305_SHA256_Ed25519),
            0x0004 => Some(Self::X448_AES256GCM_SHA512_Ed448),
            0x0005 => Some(Self::P521_AES256GCM_SHA512_P521),
            0x0006 => Some(Self::X448_CHACHA20POLY1305_SHA512_Ed448),
            _ => None,
        }
    }

    /// The 16-bit wire code.
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// The primitive bundle for this suite.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn ciphers(self) -> Result<Ciphers> {
        match self {
            Self::Unknown => Err(Error::InvalidParameter("uninitialized ciphersuite")),
            Self::X25519_AES128GCM_SHA256_Ed25519 => Ok(Ciphers {
                hpke: Hpke::new(
                    KemId::DhKemX25519HkdfSha256,
                    KdfId::HkdfSha256,
                    AeadId::Aes128Gcm,
                ),
                digest: DigestId::Sha256,
                signature: SignatureId::Ed25519,
            }),
            Self::P256_AES128GCM_SHA256_P256 => Ok(Ciphers {
                hpke: Hpke::new(
                    KemId::DhKemP256HkdfSha256,
                    KdfId::HkdfSha256,
                    AeadId::Aes128Gcm,
                ),
                digest: DigestId::Sha256,
                signature: SignatureId::EcdsaP256Sha256,
            }),
            Self::X25519_CHACHA20POLY1305_SHA256_Ed25519 => Ok(Ciphers {
                hpke: Hpke::new(
                    KemId::DhKemX25519HkdfSha256,
                    KdfId::HkdfSha256,
                    AeadId::ChaCha20Poly1305,
                ),
                digest: DigestId::Sha256,
                signature: SignatureId::Ed25519,
            }),
            Self::X448_AES256GCM_SHA512_Ed448 => Ok(Ciphers {
                hpke: Hpke::new(
                    KemId::DhKemX448HkdfSha512,
                    KdfId::HkdfSha512,
                    AeadId::Aes256Gcm,
                ),
                digest: DigestId::Sha512,
                signature: SignatureId::Ed448,
            }),
            Self::P521_AES256GCM_SHA512_P521 => Ok(Ciphers {
                hpke: Hpke::new(
                    KemId::DhKemP521HkdfSha512,
                    KdfId::HkdfSha512,
                    AeadId::Aes256Gcm,
                ),
                digest: DigestId::Sha512,
                signature: SignatureId::EcdsaP521Sha512,
            }),
            Self::X448_CHACHA20POLY1305_SHA512_Ed448 => Ok(Ciphers {
                hpke: Hpke::new(
                    KemId::DhKemX448HkdfSha512,
                    KdfId::HkdfSha512,
                    AeadId::ChaCha20Poly1305,
                ),
                digest: DigestId::Sha512,
                signature: SignatureId::Ed448,
            }),
        }
    }

    /// The suite's HPKE configuration.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn hpke(self) -> Result<Hpke> {
        Ok(self.ciphers()?.hpke)
    }

    /// The suite's hash algorithm.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn digest(self) -> Result<DigestId> {
        Ok(self.ciphers()?.digest)
    }

    /// The suite's signature algorithm.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn sig(self) -> Result<SignatureId> {
        Ok(self.ciphers()?.signature)
    }

    /// The TLS signature-scheme code carried in MLS credentials.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn signature_scheme(self) -> Result<SignatureScheme> {
        Ok(self.sig()?.scheme())
    }

    /// Size of the suite's secrets: the digest output size.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn secret_size(self) -> Result<usize> {
        Ok(self.digest()?.output_size())
    }

    /// `ExpandWithLabel(secret, label, context, length)` (MLS v1 §8):
    /// prefix `label` with `"mls10 "`, encode the `HKDFLabel` structure,
    /// and expand.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`]; `KeyDerivation` when
    /// `length` is out of range for the KDF.
    pub fn expand_with_label(
        self,
        secret: &[u8],
        label: &str,
        context: &[u8],
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let kdf = self.hpke()?.kdf;
        let mls_label = [b"mls10 ".as_slice(), label.as_bytes()].concat();
        let length16 =
            u16::try_from(length).map_err(|_| Error::KeyDerivation("output length exceeds u16"))?;
        let label_bytes = marshal(&HkdfLabel {
            length: length16,
            label: VLBytes::new(mls_label),
            context: VLBytes::new(context.to_vec()),
        })?;

        trace!(label, length, "ExpandWithLabel");

        kdf.expand(secret, &label_bytes, length)
    }

    /// `DeriveSecret(secret, label) = ExpandWithLabel(secret, label, "",
    /// secret_size())`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn derive_secret(self, secret: &[u8], label: &str) -> Result<Zeroizing<Vec<u8>>> {
        trace!(label, "DeriveSecret");
        self.expand_with_label(secret, label, &[], self.secret_size()?)
    }

    /// `MakeKeyPackageRef(value) = KDF.expand(KDF.extract("", value),
    /// "MLS 1.0 KeyPackage Reference", 16)` over a TLS-serialized
    /// `KeyPackage`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn key_package_ref(self, value: &[u8]) -> Result<Vec<u8>> {
        self.make_reference(KEY_PACKAGE_REFERENCE_LABEL, value)
    }

    /// `MakeProposalRef(value) = KDF.expand(KDF.extract("", value),
    /// "MLS 1.0 Proposal Reference", 16)`.
    ///
    /// Even though the label says "Proposal", the value hashed is the
    /// entire enclosing authenticated-content object.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on [`CipherSuite::Unknown`].
    pub fn proposal_ref(self, value: &[u8]) -> Result<Vec<u8>> {
        self.make_reference(PROPOSAL_REFERENCE_LABEL, value)
    }

    fn make_reference(self, label: &[u8], value: &[u8]) -> Result<Vec<u8>> {
        let kdf = self.hpke()?.kdf;
        let extracted = kdf.extract(&[], value);
        Ok(kdf.expand(&extracted, label, REFERENCE_SIZE)?.to_vec())
    }
}

impl mls_codec::Size for CipherSuite {
    fn tls_serialized_len(&self) -> usize {
        2
    }
}

impl mls_codec::Serialize for CipherSuite {
    fn tls_serialize<W: std::io::Write>(&self, writer: &mut W) -> std::result::Result<usize, tls_codec::Error> {
        self.to_u16().tls_serialize(writer)
    }
}

impl mls_codec::Deserialize for CipherSuite {
    fn tls_deserialize<R: std::io::Read>(bytes: &mut R) -> std::result::Result<Self, tls_codec::Error> {
        let code = u16::tls_deserialize(bytes)?;
        Self::from_u16(code)
            .ok_or_else(|| tls_codec::Error::DecodingError(format!("unknown ciphersuite {code:#06x}")))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CipherSuite {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.to_u16())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CipherSuite {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = <u16 as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_u16(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown ciphersuite {code:#06x}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_code_roundtrip() {
        for suite in ALL_SUPPORTED_SUITES {
            assert_eq!(CipherSuite::from_u16(suite.to_u16()), Some(suite));
        }
        assert_eq!(CipherSuite::from_u16(0x0000), Some(CipherSuite::Unknown));
        assert_eq!(CipherSuite::from_u16(0x0007), None);
    }

    #[test]
    fn test_unknown_suite_fails_everywhere() {
        let suite = CipherSuite::default();
        assert_eq!(suite, CipherSuite::Unknown);
        assert!(matches!(suite.ciphers(), Err(Error::InvalidParameter(_))));
        assert!(suite.signature_scheme().is_err());
        assert!(suite.expand_with_label(&[0u8; 32], "test", &[], 32).is_err());
        assert!(suite.derive_secret(&[0u8; 32], "test").is_err());
        assert!(suite.key_package_ref(b"value").is_err());
    }

    #[test]
    fn test_signature_scheme_mapping() {
        use SignatureScheme::*;
        let expected = [
            Ed25519,
            EcdsaSecp256r1Sha256,
            Ed25519,
            Ed448,
            EcdsaSecp521r1Sha512,
            Ed448,
        ];
        for (suite, scheme) in ALL_SUPPORTED_SUITES.iter().zip(expected) {
            assert_eq!(suite.signature_scheme().unwrap(), scheme);
        }
    }

    #[test]
    fn test_signature_scheme_matches_sig() {
        for suite in ALL_SUPPORTED_SUITES {
            assert_eq!(suite.signature_scheme().unwrap(), suite.sig().unwrap().scheme());
        }
    }

    #[test]
    fn test_expand_with_label_golden() {
        let suite = CipherSuite::X25519_AES128GCM_SHA256_Ed25519;
        let out = suite.expand_with_label(&[0u8; 32], "test", &[], 32).unwrap();
        assert_eq!(
            hex::encode(&*out),
            "bed003aa8c18221726a0237404a5f475d60baaa2337855a3a04f7094379f7792"
        );
    }

    #[test]
    fn test_derive_secret_length_is_digest_size() {
        for suite in ALL_SUPPORTED_SUITES {
            let out = suite.derive_secret(&[1u8; 64], "epoch").unwrap();
            assert_eq!(out.len(), suite.secret_size().unwrap());
        }
    }

    #[test]
    fn test_reference_goldens() {
        let suite = CipherSuite::X25519_AES128GCM_SHA256_Ed25519;
        let value: Vec<u8> = (0..32).collect();

        let kp_ref = suite.key_package_ref(&value).unwrap();
        assert_eq!(hex::encode(&kp_ref), "26763b1f283d055cf998019048811e82");

        let prop_ref = suite.proposal_ref(&value).unwrap();
        assert_eq!(hex::encode(&prop_ref), "f433aa090ff99c8ed7744ea6a54f5f0a");
    }

    #[test]
    fn test_reference_length_is_16_for_all_suites() {
        for suite in ALL_SUPPORTED_SUITES {
            assert_eq!(suite.key_package_ref(b"value").unwrap().len(), 16);
            assert_eq!(suite.proposal_ref(b"value").unwrap().len(), 16);
        }
    }

    #[test]
    fn test_tls_encoding_is_the_wire_code() {
        let suite = CipherSuite::P256_AES128GCM_SHA256_P256;
        assert_eq!(mls_codec::marshal(&suite).unwrap(), vec![0x00, 0x02]);

        let decoded: CipherSuite = mls_codec::get(&[0x00, 0x05]).unwrap();
        assert_eq!(decoded, CipherSuite::P521_AES256GCM_SHA512_P521);
        assert!(mls_codec::get::<CipherSuite>(&[0x00, 0x09]).is_err());
    }
}
