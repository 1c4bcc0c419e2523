//! JSON schema for the MLS interop test vectors.
//!
//! The shapes here are exchanged with other MLS implementations through the
//! interop harness, so the encoding conventions are fixed:
//!
//! - byte sequences and TLS-serialized structures appear as hex strings
//! - optional values appear as `null` or the inner value
//! - ciphersuites appear as their 16-bit registry code
//! - the 32-bit tree-math wrappers appear as plain numbers
//!
//! This layer is a testing boundary, not part of the cryptographic
//! contract: structured MLS objects (trees, key packages, framed content)
//! travel as the hex of their TLS marshalling and are decoded by whichever
//! side needs to look inside.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use mls_crypto::CipherSuite;

/// A byte string that serializes as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HexBytes(pub Vec<u8>);

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map(HexBytes).map_err(serde::de::Error::custom)
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for HexBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

macro_rules! uint32_wrapper {
    ($(#[doc = $doc:literal] $name:ident),+ $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub u32);

            impl From<u32> for $name {
                fn from(val: u32) -> Self {
                    Self(val)
                }
            }
        )+
    };
}

uint32_wrapper!(
    #[doc = "Number of leaves in a ratchet tree."]
    LeafCount,
    #[doc = "Number of nodes in a ratchet tree."]
    NodeCount,
    #[doc = "Index of a leaf in the leaf ordering."]
    LeafIndex,
    #[doc = "Index of a node in the node ordering."]
    NodeIndex,
);

/// Precomputed tree-math relations for a tree of `n_leaves` leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMathTestVector {
    /// Leaf count the relations are computed for.
    pub n_leaves: LeafCount,
    /// Node count of the tree.
    pub n_nodes: NodeCount,
    /// Root node for each tree size up to `n_leaves`.
    pub root: Vec<NodeIndex>,
    /// Left child per node; `null` at leaves.
    pub left: Vec<Option<NodeIndex>>,
    /// Right child per node; `null` at leaves.
    pub right: Vec<Option<NodeIndex>>,
    /// Parent per node; `null` at the root.
    pub parent: Vec<Option<NodeIndex>>,
    /// Sibling per node; `null` at the root.
    pub sibling: Vec<Option<NodeIndex>>,
}

/// Sender-data key and nonce expected for a given ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderDataInfo {
    /// Ciphertext the sender data is derived from.
    pub ciphertext: HexBytes,
    /// Expected sender-data key.
    pub key: HexBytes,
    /// Expected sender-data nonce.
    pub nonce: HexBytes,
}

/// One step of a hash ratchet: expected key/nonce and a ciphertext sealed
/// under them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatchetStep {
    /// Expected ratchet key.
    pub key: HexBytes,
    /// Expected ratchet nonce.
    pub nonce: HexBytes,
    /// Ciphertext produced at this generation.
    pub ciphertext: HexBytes,
}

/// Per-leaf ratchet expectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafInfo {
    /// Number of generations exercised.
    pub generations: u32,
    /// TLS-serialized authenticated content for the handshake ratchet.
    pub handshake_content_auth: HexBytes,
    /// TLS-serialized authenticated content for the application ratchet.
    pub application_content_auth: HexBytes,
    /// Handshake ratchet steps.
    pub handshake: Vec<RatchetStep>,
    /// Application ratchet steps.
    pub application: Vec<RatchetStep>,
}

/// Secret-tree and message-protection expectations for one group state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionTestVector {
    /// Ciphersuite under test.
    pub cipher_suite: CipherSuite,
    /// TLS-serialized ratchet tree.
    pub tree: HexBytes,
    /// Root encryption secret.
    pub encryption_secret: HexBytes,
    /// Sender-data secret.
    pub sender_data_secret: HexBytes,
    /// Padding size applied to ciphertexts.
    pub padding_size: u32,
    /// Sender-data derivation expectations.
    pub sender_data_info: SenderDataInfo,
    /// Authenticated data carried by the ciphertexts.
    pub authenticated_data: HexBytes,
    /// Per-leaf ratchet expectations.
    pub leaves: Vec<LeafInfo>,
}

/// An external PSK injected into an epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPskInfo {
    /// PSK identifier.
    pub id: HexBytes,
    /// PSK nonce.
    pub nonce: HexBytes,
    /// PSK secret.
    pub secret: HexBytes,
}

/// Expected key-schedule outputs for one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    /// Tree hash after the epoch change.
    pub tree_hash: HexBytes,
    /// Commit secret feeding the epoch.
    pub commit_secret: HexBytes,
    /// Confirmed transcript hash.
    pub confirmed_transcript_hash: HexBytes,
    /// External PSKs injected this epoch.
    pub external_psks: Vec<ExternalPskInfo>,
    /// PSK nonce.
    pub psk_nonce: HexBytes,
    /// PSK secret.
    pub psk_secret: HexBytes,
    /// TLS-serialized group context.
    pub group_context: HexBytes,
    /// Joiner secret.
    pub joiner_secret: HexBytes,
    /// Welcome secret.
    pub welcome_secret: HexBytes,
    /// Init secret.
    pub init_secret: HexBytes,
    /// Sender-data secret.
    pub sender_data_secret: HexBytes,
    /// Encryption secret.
    pub encryption_secret: HexBytes,
    /// Exporter secret.
    pub exporter_secret: HexBytes,
    /// Authentication secret.
    pub authentication_secret: HexBytes,
    /// External secret.
    pub external_secret: HexBytes,
    /// Confirmation key.
    pub confirmation_key: HexBytes,
    /// Membership key.
    pub membership_key: HexBytes,
    /// Resumption secret.
    pub resumption_secret: HexBytes,
    /// External HPKE public key derived from the external secret.
    pub external_pub: HexBytes,
}

/// Key-schedule expectations across a chain of epochs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyScheduleTestVector {
    /// Ciphersuite under test.
    pub cipher_suite: CipherSuite,
    /// Group identifier.
    pub group_id: HexBytes,
    /// Init secret seeding the first epoch.
    pub initial_init_secret: HexBytes,
    /// Per-epoch expectations.
    pub epochs: Vec<Epoch>,
}

/// Transcript-hash expectations across one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTestVector {
    /// Ciphersuite under test.
    pub cipher_suite: CipherSuite,
    /// Group identifier.
    pub group_id: HexBytes,
    /// Epoch of the commit.
    pub epoch: u64,
    /// Tree hash before the commit.
    pub tree_hash_before: HexBytes,
    /// Confirmed transcript hash before the commit.
    pub confirmed_transcript_hash_before: HexBytes,
    /// Interim transcript hash before the commit.
    pub interim_transcript_hash_before: HexBytes,
    /// Confirmation key for the epoch.
    pub confirmation_key: HexBytes,
    /// Signature public key of the committer.
    pub signature_key: HexBytes,
    /// TLS-serialized commit plaintext.
    pub commit: HexBytes,
    /// TLS-serialized group context.
    pub group_context: HexBytes,
    /// Confirmed transcript hash after the commit.
    pub confirmed_transcript_hash_after: HexBytes,
    /// Interim transcript hash after the commit.
    pub interim_transcript_hash_after: HexBytes,
}

/// Ratchet-tree evolution expectations across an add and an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeKemTestVector {
    /// Ciphersuite under test.
    pub cipher_suite: CipherSuite,
    /// Group identifier.
    pub group_id: HexBytes,
    /// TLS-serialized ratchet tree before the operations.
    pub ratchet_tree_before: HexBytes,
    /// Leaf adding the new member.
    pub add_sender: LeafIndex,
    /// Leaf secret of the joiner.
    pub my_leaf_secret: HexBytes,
    /// TLS-serialized leaf node of the joiner.
    pub my_leaf_node: HexBytes,
    /// Path secret delivered to the joiner.
    pub my_path_secret: HexBytes,
    /// Leaf sending the update path.
    pub update_sender: LeafIndex,
    /// TLS-serialized update path.
    pub update_path: HexBytes,
    /// TLS-serialized group context for the update.
    pub update_group_context: HexBytes,
    /// Tree hash before the operations.
    pub tree_hash_before: HexBytes,
    /// Root secret after the add.
    pub root_secret_after_add: HexBytes,
    /// Root secret after the update.
    pub root_secret_after_update: HexBytes,
    /// TLS-serialized ratchet tree after the operations.
    pub ratchet_tree_after: HexBytes,
    /// Tree hash after the operations.
    pub tree_hash_after: HexBytes,
}

/// A parseability corpus: one TLS-serialized instance of every message
/// type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesTestVector {
    /// TLS-serialized key package.
    pub key_package: HexBytes,
    /// TLS-serialized ratchet tree.
    pub ratchet_tree: HexBytes,
    /// TLS-serialized group info.
    pub group_info: HexBytes,
    /// TLS-serialized group secrets.
    pub group_secrets: HexBytes,
    /// TLS-serialized welcome.
    pub welcome: HexBytes,
    /// TLS-serialized add proposal.
    pub add_proposal: HexBytes,
    /// TLS-serialized update proposal.
    pub update_proposal: HexBytes,
    /// TLS-serialized remove proposal.
    pub remove_proposal: HexBytes,
    /// TLS-serialized pre-shared-key proposal.
    pub pre_shared_key_proposal: HexBytes,
    /// TLS-serialized re-init proposal.
    pub re_init_proposal: HexBytes,
    /// TLS-serialized external-init proposal.
    pub external_init_proposal: HexBytes,
    /// TLS-serialized commit.
    pub commit: HexBytes,
    /// TLS-serialized authenticated application content.
    pub content_auth_app: HexBytes,
    /// TLS-serialized authenticated proposal content.
    pub content_auth_proposal: HexBytes,
    /// TLS-serialized authenticated commit content.
    pub content_auth_commit: HexBytes,
    /// TLS-serialized plaintext framing.
    pub mls_plaintext: HexBytes,
    /// TLS-serialized ciphertext framing.
    pub mls_ciphertext: HexBytes,
}
