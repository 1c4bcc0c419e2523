//! JSON vector schema conformance: the encodings other implementations
//! produce must parse, and re-encoding must not change meaning.

use mls_vectors::{
    CipherSuite, HexBytes, LeafCount, MessagesTestVector, NodeIndex, TranscriptTestVector,
    TreeMathTestVector,
};

#[test]
fn test_tree_math_vector_external_shape() {
    // As produced by a foreign implementation: plain numbers and nulls.
    let json = r#"{
        "n_leaves": 4,
        "n_nodes": 7,
        "root": [0, 1, 3, 3],
        "left": [null, 0, null, 1, null, 4, null],
        "right": [null, 2, null, 5, null, 6, null],
        "parent": [1, 3, 1, null, 5, 3, 5],
        "sibling": [2, 5, 0, null, 6, 1, 4]
    }"#;

    let vector: TreeMathTestVector = serde_json::from_str(json).unwrap();
    assert_eq!(vector.n_leaves, LeafCount(4));
    assert_eq!(vector.root.len(), 4);
    assert_eq!(vector.parent[3], None);
    assert_eq!(vector.sibling[0], Some(NodeIndex(2)));

    let reencoded = serde_json::to_value(&vector).unwrap();
    let original: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(reencoded, original);
}

#[test]
fn test_transcript_vector_hex_fields() {
    let json = r#"{
        "cipher_suite": 2,
        "group_id": "00112233",
        "epoch": 7,
        "tree_hash_before": "aa",
        "confirmed_transcript_hash_before": "bb",
        "interim_transcript_hash_before": "cc",
        "confirmation_key": "dd",
        "signature_key": "ee",
        "commit": "ff00",
        "group_context": "0102",
        "confirmed_transcript_hash_after": "0304",
        "interim_transcript_hash_after": "0506"
    }"#;

    let vector: TranscriptTestVector = serde_json::from_str(json).unwrap();
    assert_eq!(vector.cipher_suite, CipherSuite::P256_AES128GCM_SHA256_P256);
    assert_eq!(vector.epoch, 7);
    assert_eq!(vector.group_id, HexBytes(vec![0x00, 0x11, 0x22, 0x33]));
    assert_eq!(vector.commit, HexBytes(vec![0xff, 0x00]));

    let reencoded = serde_json::to_value(&vector).unwrap();
    let original: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(reencoded, original);
}

#[test]
fn test_messages_vector_roundtrip() {
    let blob = |byte: u8| HexBytes(vec![byte; 8]);
    let vector = MessagesTestVector {
        key_package: blob(1),
        ratchet_tree: blob(2),
        group_info: blob(3),
        group_secrets: blob(4),
        welcome: blob(5),
        add_proposal: blob(6),
        update_proposal: blob(7),
        remove_proposal: blob(8),
        pre_shared_key_proposal: blob(9),
        re_init_proposal: blob(10),
        external_init_proposal: blob(11),
        commit: blob(12),
        content_auth_app: blob(13),
        content_auth_proposal: blob(14),
        content_auth_commit: blob(15),
        mls_plaintext: blob(16),
        mls_ciphertext: blob(17),
    };

    let json = serde_json::to_string(&vector).unwrap();
    let reparsed: MessagesTestVector = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, vector);
}

#[test]
fn test_rejects_malformed_hex_field() {
    let json = r#"{
        "cipher_suite": 1,
        "group_id": "not hex",
        "epoch": 0,
        "tree_hash_before": "",
        "confirmed_transcript_hash_before": "",
        "interim_transcript_hash_before": "",
        "confirmation_key": "",
        "signature_key": "",
        "commit": "",
        "group_context": "",
        "confirmed_transcript_hash_after": "",
        "interim_transcript_hash_after": ""
    }"#;
    assert!(serde_json::from_str::<TranscriptTestVector>(json).is_err());
}
