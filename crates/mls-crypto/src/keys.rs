//! HPKE and signature key types.
//!
//! Keys hold their algorithm's serialized representation and are bound to a
//! ciphersuite at operation time, not at construction. Private keys pair
//! the secret bytes with the derived public half; the secret bytes are
//! zeroized on drop and have no wire encoding.

use subtle::ConstantTimeEq;
use tracing::trace;
use zeroize::Zeroizing;

use mls_codec::{marshal, TlsDeserialize, TlsSerialize, TlsSize, VLBytes};

use crate::error::Result;
use crate::suite::CipherSuite;

/// Domain-separation labels for MLS signatures, exactly as on the wire.
pub mod sign_label {
    /// Framed content.
    pub const MLS_CONTENT: &[u8] = b"MLS 1.0 MLSContentTBS";
    /// Leaf nodes.
    pub const LEAF_NODE: &[u8] = b"MLS 1.0 LeafNodeTBS";
    /// Key packages.
    pub const KEY_PACKAGE: &[u8] = b"MLS 1.0 KeyPackageTBS";
    /// Group info.
    pub const GROUP_INFO: &[u8] = b"MLS 1.0 GroupInfoTBS";
}

/// The envelope actually signed: every MLS signature covers
/// `SignContent { label, content }` rather than the bare message.
#[derive(Debug, TlsSerialize, TlsSize)]
struct SignContent {
    label: VLBytes,
    content: VLBytes,
}

fn sign_content(label: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    Ok(marshal(&SignContent {
        label: VLBytes::new(label.to_vec()),
        content: VLBytes::new(message.to_vec()),
    })?)
}

/// The output of HPKE single-shot encryption.
#[derive(Debug, Clone, PartialEq, Eq, TlsSerialize, TlsDeserialize, TlsSize)]
pub struct HpkeCiphertext {
    /// KEM encapsulation.
    pub kem_output: VLBytes,
    /// AEAD ciphertext with appended tag.
    pub ciphertext: VLBytes,
}

/// An HPKE public key: the KEM's serialized public representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, TlsSerialize, TlsDeserialize, TlsSize)]
pub struct HpkePublicKey {
    /// Serialized key bytes.
    pub data: VLBytes,
}

impl HpkePublicKey {
    /// Wrap serialized public key bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: VLBytes::new(data),
        }
    }

    /// The serialized key bytes.
    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Single-shot HPKE seal to this key.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite or malformed key bytes.
    pub fn encrypt(
        &self,
        suite: CipherSuite,
        info: &[u8],
        aad: &[u8],
        pt: &[u8],
    ) -> Result<HpkeCiphertext> {
        let hpke = suite.hpke()?;
        let (enc, mut context) = hpke.setup_base_s(self.as_slice(), info)?;
        let ct = context.seal(aad, pt)?;

        trace!(
            suite = suite.to_u16(),
            pt_len = pt.len(),
            "HPKE seal"
        );

        Ok(HpkeCiphertext {
            kem_output: VLBytes::new(enc),
            ciphertext: VLBytes::new(ct),
        })
    }

    /// Encapsulate to this key and export a secret from the fresh context.
    ///
    /// Returns the KEM output together with the exported secret; the
    /// holder of the private key recovers the same secret with
    /// [`HpkePrivateKey::do_export`].
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite or malformed key bytes.
    pub fn do_export(
        &self,
        suite: CipherSuite,
        info: &[u8],
        label: &str,
        length: usize,
    ) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
        let hpke = suite.hpke()?;
        let (enc, context) = hpke.setup_base_s(self.as_slice(), info)?;
        let exported = context.export(label.as_bytes(), length)?;
        Ok((enc, exported))
    }
}

/// An HPKE private key together with its derived public half.
pub struct HpkePrivateKey {
    data: Zeroizing<Vec<u8>>,
    /// The public half; always consistent with the private bytes.
    pub public_key: HpkePublicKey,
}

impl HpkePrivateKey {
    /// Generate a fresh key pair under `suite`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite.
    pub fn generate(suite: CipherSuite) -> Result<Self> {
        let pair = suite.hpke()?.kem.generate_key_pair()?;
        Ok(Self {
            data: pair.private,
            public_key: HpkePublicKey::new(pair.public),
        })
    }

    /// Derive a key pair deterministically from `secret`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite.
    pub fn derive(suite: CipherSuite, secret: &[u8]) -> Result<Self> {
        let pair = suite.hpke()?.kem.derive_key_pair(secret)?;
        Ok(Self {
            data: pair.private,
            public_key: HpkePublicKey::new(pair.public),
        })
    }

    /// Re-adopt serialized private key bytes, recomputing the public half.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite or malformed bytes.
    pub fn parse(suite: CipherSuite, data: &[u8]) -> Result<Self> {
        let pair = suite.hpke()?.kem.parse_private(data)?;
        Ok(Self {
            data: pair.private,
            public_key: HpkePublicKey::new(pair.public),
        })
    }

    /// Single-shot HPKE open.
    ///
    /// # Errors
    ///
    /// `HpkeDecryption` when the AEAD rejects the ciphertext;
    /// `InvalidParameter` on an unknown suite or malformed encapsulation.
    pub fn decrypt(
        &self,
        suite: CipherSuite,
        info: &[u8],
        aad: &[u8],
        ct: &HpkeCiphertext,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let hpke = suite.hpke()?;
        let mut context = hpke.setup_base_r(ct.kem_output.as_slice(), &self.data, info)?;
        let pt = context.open(aad, ct.ciphertext.as_slice())?;

        trace!(
            suite = suite.to_u16(),
            ct_len = ct.ciphertext.as_slice().len(),
            "HPKE open"
        );

        Ok(pt)
    }

    /// Recover a secret exported by [`HpkePublicKey::do_export`].
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite or malformed encapsulation.
    pub fn do_export(
        &self,
        suite: CipherSuite,
        info: &[u8],
        kem_output: &[u8],
        label: &str,
        length: usize,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let hpke = suite.hpke()?;
        let context = hpke.setup_base_r(kem_output, &self.data, info)?;
        context.export(label.as_bytes(), length)
    }
}

impl PartialEq for HpkePrivateKey {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.data.ct_eq(&other.data)) && self.public_key == other.public_key
    }
}

impl Eq for HpkePrivateKey {}

impl std::fmt::Debug for HpkePrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HpkePrivateKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// A signature public key: the scheme's serialized public representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, TlsSerialize, TlsDeserialize, TlsSize)]
pub struct SignaturePublicKey {
    /// Serialized key bytes.
    pub data: VLBytes,
}

impl SignaturePublicKey {
    /// Wrap serialized public key bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: VLBytes::new(data),
        }
    }

    /// The serialized key bytes.
    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Verify an MLS-labelled signature over `message`.
    ///
    /// Returns `Ok(false)` when the signature does not verify; errors are
    /// reserved for an unknown suite or malformed key bytes.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite or malformed key bytes.
    pub fn verify(
        &self,
        suite: CipherSuite,
        label: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let content = sign_content(label, message)?;
        suite.sig()?.verify(&content, signature, self.as_slice())
    }
}

/// A signature private key together with its derived public half.
pub struct SignaturePrivateKey {
    data: Zeroizing<Vec<u8>>,
    /// The public half; always consistent with the private bytes.
    pub public_key: SignaturePublicKey,
}

impl SignaturePrivateKey {
    /// Generate a fresh key pair under `suite`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite.
    pub fn generate(suite: CipherSuite) -> Result<Self> {
        let pair = suite.sig()?.generate_key_pair()?;
        Ok(Self {
            data: pair.private,
            public_key: SignaturePublicKey::new(pair.public),
        })
    }

    /// Derive a key pair deterministically from `secret`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite.
    pub fn derive(suite: CipherSuite, secret: &[u8]) -> Result<Self> {
        let pair = suite.sig()?.derive_key_pair(secret)?;
        Ok(Self {
            data: pair.private,
            public_key: SignaturePublicKey::new(pair.public),
        })
    }

    /// Re-adopt serialized private key bytes, recomputing the public half.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite or malformed bytes.
    pub fn parse(suite: CipherSuite, data: &[u8]) -> Result<Self> {
        let pair = suite.sig()?.parse_private(data)?;
        Ok(Self {
            data: pair.private,
            public_key: SignaturePublicKey::new(pair.public),
        })
    }

    /// Produce an MLS-labelled signature over `message`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` on an unknown suite.
    pub fn sign(&self, suite: CipherSuite, label: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let content = sign_content(label, message)?;
        suite.sig()?.sign(&content, &self.data)
    }
}

impl PartialEq for SignaturePrivateKey {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.data.ct_eq(&other.data)) && self.public_key == other.public_key
    }
}

impl Eq for SignaturePrivateKey {}

impl std::fmt::Debug for SignaturePrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignaturePrivateKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
