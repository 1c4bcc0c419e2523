//! Wire-format conformance tests: canonical re-encoding and strict
//! decoding for every TLS-serializable core type.

use mls_codec::{get, marshal, CodecError, VLBytes};
use mls_crypto::{CipherSuite, HpkeCiphertext, HpkePublicKey, SignaturePublicKey};

#[test]
fn test_public_key_roundtrip_is_canonical() {
    let key = HpkePublicKey::new((0u8..32).collect());
    let encoded = marshal(&key).unwrap();
    let decoded: HpkePublicKey = get(&encoded).unwrap();
    assert_eq!(decoded, key);
    assert_eq!(marshal(&decoded).unwrap(), encoded);
}

#[test]
fn test_ciphertext_field_order() {
    let ct = HpkeCiphertext {
        kem_output: VLBytes::new(vec![0x11, 0x22]),
        ciphertext: VLBytes::new(vec![0x33, 0x44, 0x55]),
    };
    // kem_output first, then ciphertext, each with a varint length prefix.
    assert_eq!(
        marshal(&ct).unwrap(),
        vec![0x02, 0x11, 0x22, 0x03, 0x33, 0x44, 0x55]
    );
}

#[test]
fn test_decode_rejects_trailing_bytes() {
    let mut encoded = marshal(&SignaturePublicKey::new(vec![0xaa; 4])).unwrap();
    encoded.push(0x00);
    assert!(matches!(
        get::<SignaturePublicKey>(&encoded),
        Err(CodecError::TrailingBytes { remaining: 1 })
    ));
}

#[test]
fn test_decode_rejects_truncation() {
    let encoded = marshal(&HpkePublicKey::new(vec![0xbb; 16])).unwrap();
    for cut in 0..encoded.len() {
        assert!(get::<HpkePublicKey>(&encoded[..cut]).is_err());
    }
}

#[test]
fn test_decode_rejects_oversized_length_prefix() {
    // Prefix promises 0x20 bytes, the buffer carries 2.
    let bogus = [0x20u8, 0x01, 0x02];
    assert!(get::<VLBytes>(&bogus).is_err());
}

#[test]
fn test_cipher_suite_code_roundtrip() {
    for suite in mls_crypto::ALL_SUPPORTED_SUITES {
        let encoded = marshal(&suite).unwrap();
        assert_eq!(encoded, suite.to_u16().to_be_bytes());
        assert_eq!(get::<CipherSuite>(&encoded).unwrap(), suite);
    }
}

#[test]
fn test_cipher_suite_unknown_discriminator() {
    assert!(get::<CipherSuite>(&[0x7f, 0xff]).is_err());
}

#[test]
fn test_large_vector_uses_wider_varint() {
    let value = VLBytes::new(vec![0xcc; 300]);
    let encoded = marshal(&value).unwrap();
    // 300 does not fit the one-byte varint; the prefix widens to two bytes.
    assert_eq!(encoded.len(), 2 + 300);
    assert_eq!(get::<VLBytes>(&encoded).unwrap(), value);
}
