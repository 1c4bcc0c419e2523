//! Cryptographic conformance tests.
//!
//! Sweeps every supported ciphersuite through HPKE, signature, and
//! key-schedule behavior, and pins golden values so derivations stay
//! stable across releases.

use rand::RngCore;

use mls_crypto::{
    sign_label, CipherSuite, HpkePrivateKey, HpkePublicKey, SignaturePrivateKey,
    SignaturePublicKey, ALL_SUPPORTED_SUITES,
};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

mod hpke_tests {
    use super::*;

    #[test]
    fn test_basic_hpke() {
        let info = random_bytes(100);
        let aad = random_bytes(100);
        let original = random_bytes(100);

        for suite in ALL_SUPPORTED_SUITES {
            let x = HpkePrivateKey::generate(suite).unwrap();
            let y = HpkePrivateKey::derive(suite, &[0, 1, 2, 3]).unwrap();

            assert_eq!(x, x);
            assert_eq!(y, y);
            assert_ne!(x, y);

            let g_x = &x.public_key;
            let g_y = &y.public_key;
            assert_eq!(g_x, g_x);
            assert_eq!(g_y, g_y);
            assert_ne!(g_x, g_y);

            let encrypted = g_x.encrypt(suite, &info, &aad, &original).unwrap();
            let decrypted = x.decrypt(suite, &info, &aad, &encrypted).unwrap();

            assert_eq!(&*decrypted, original.as_slice());
        }
    }

    /// Derivation from a fixed seed must stay stable across runs and
    /// releases.
    #[test]
    fn test_derived_public_key_golden() {
        let suite = CipherSuite::X25519_AES128GCM_SHA256_Ed25519;
        let x = HpkePrivateKey::derive(suite, &[0x00, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(
            hex::encode(x.public_key.as_slice()),
            "79e3a921d8e15ea0a139f4316260cfa1c13eaed503234491c2f8e0f41cdaa61f"
        );

        let again = HpkePrivateKey::derive(suite, &[0x00, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(x, again);
    }

    #[test]
    fn test_hpke_key_serialization() {
        for suite in ALL_SUPPORTED_SUITES {
            let x = HpkePrivateKey::derive(suite, &[0, 1, 2, 3]).unwrap();
            let g_x = &x.public_key;

            let parsed = HpkePublicKey::new(g_x.as_slice().to_vec());
            assert_eq!(&parsed, g_x);

            let marshaled = mls_codec::marshal(g_x).unwrap();
            let g_x2: HpkePublicKey = mls_codec::get(&marshaled).unwrap();
            assert_eq!(&g_x2, g_x);
        }
    }

    #[test]
    fn test_export_agreement() {
        for suite in ALL_SUPPORTED_SUITES {
            let sk = HpkePrivateKey::generate(suite).unwrap();
            let (enc, exported_s) = sk
                .public_key
                .do_export(suite, b"info", "mls exporter", 32)
                .unwrap();
            let exported_r = sk
                .do_export(suite, b"info", &enc, "mls exporter", 32)
                .unwrap();
            assert_eq!(&*exported_s, &*exported_r);
        }
    }

    #[test]
    fn test_private_key_parse_consistency() {
        for suite in ALL_SUPPORTED_SUITES {
            let generated = HpkePrivateKey::generate(suite).unwrap();
            let encrypted = generated
                .public_key
                .encrypt(suite, b"info", b"aad", b"pt")
                .unwrap();
            let decrypted = generated.decrypt(suite, b"info", b"aad", &encrypted).unwrap();
            assert_eq!(&*decrypted, b"pt");
        }
    }
}

mod signature_tests {
    use super::*;

    #[test]
    fn test_basic_signature() {
        for suite in ALL_SUPPORTED_SUITES {
            let a = SignaturePrivateKey::generate(suite).unwrap();
            let b = SignaturePrivateKey::generate(suite).unwrap();

            assert_eq!(a, a);
            assert_eq!(b, b);
            assert_ne!(a, b);

            assert_eq!(a.public_key, a.public_key);
            assert_eq!(b.public_key, b.public_key);
            assert_ne!(a.public_key, b.public_key);

            let label = b"label".as_slice();
            let message = &[0x01u8, 0x02, 0x03, 0x04];
            let signature = a.sign(suite, label, message).unwrap();

            assert!(a.public_key.verify(suite, label, message, &signature).unwrap());
            assert!(!b.public_key.verify(suite, label, message, &signature).unwrap());
        }
    }

    #[test]
    fn test_label_domain_separation() {
        for suite in ALL_SUPPORTED_SUITES {
            let sk = SignaturePrivateKey::generate(suite).unwrap();
            let signature = sk.sign(suite, sign_label::MLS_CONTENT, b"message").unwrap();

            assert!(sk
                .public_key
                .verify(suite, sign_label::MLS_CONTENT, b"message", &signature)
                .unwrap());
            assert!(!sk
                .public_key
                .verify(suite, sign_label::GROUP_INFO, b"message", &signature)
                .unwrap());
        }
    }

    #[test]
    fn test_signature_key_serialization() {
        for suite in ALL_SUPPORTED_SUITES {
            let x = SignaturePrivateKey::generate(suite).unwrap();
            let g_x = &x.public_key;

            let parsed = SignaturePublicKey::new(g_x.as_slice().to_vec());
            assert_eq!(&parsed, g_x);

            let g_x2: SignaturePublicKey =
                mls_codec::get(&mls_codec::marshal(g_x).unwrap()).unwrap();
            assert_eq!(&g_x2, g_x);
        }
    }

    #[test]
    fn test_signature_derive_is_stable() {
        for suite in ALL_SUPPORTED_SUITES {
            let a = SignaturePrivateKey::derive(suite, &[9, 9, 9]).unwrap();
            let b = SignaturePrivateKey::derive(suite, &[9, 9, 9]).unwrap();
            assert_eq!(a, b);

            let signature = a.sign(suite, b"label", b"message").unwrap();
            assert!(b.public_key.verify(suite, b"label", b"message", &signature).unwrap());
        }
    }
}

mod key_schedule_tests {
    use super::*;

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
    fn test_expand_with_label_output_length() {
        for suite in ALL_SUPPORTED_SUITES {
            for length in [16usize, 32, 48, 64] {
                let out = suite
                    .expand_with_label(&[7u8; 64], "test", b"context", length)
                    .unwrap();
                assert_eq!(out.len(), length);
            }
        }
    }

    #[test]
    fn test_derive_secret_matches_digest_size() {
        for suite in ALL_SUPPORTED_SUITES {
            let out = suite.derive_secret(&[7u8; 64], "init").unwrap();
            assert_eq!(out.len(), suite.secret_size().unwrap());
        }
    }
}

mod reference_tests {
    use super::*;

    #[test]
    fn test_key_package_ref_golden() {
        let suite = CipherSuite::X25519_AES128GCM_SHA256_Ed25519;
        let value: Vec<u8> = (0..32).collect();
        let reference = suite.key_package_ref(&value).unwrap();
        assert_eq!(hex::encode(&reference), "26763b1f283d055cf998019048811e82");
    }

    #[test]
    fn test_references_are_16_bytes_everywhere() {
        let value = random_bytes(200);
        for suite in ALL_SUPPORTED_SUITES {
            assert_eq!(suite.key_package_ref(&value).unwrap().len(), 16);
            assert_eq!(suite.proposal_ref(&value).unwrap().len(), 16);
        }
    }

    #[test]
    fn test_reference_labels_are_domain_separated() {
        let suite = CipherSuite::P256_AES128GCM_SHA256_P256;
        let value = random_bytes(64);
        assert_ne!(
            suite.key_package_ref(&value).unwrap(),
            suite.proposal_ref(&value).unwrap()
        );
    }
}

mod unknown_suite_tests {
    use super::*;

    #[test]
    fn test_every_operation_fails_on_unknown() {
        let suite = CipherSuite::default();
        assert_eq!(suite, CipherSuite::Unknown);

        assert!(HpkePrivateKey::generate(suite).is_err());
        assert!(HpkePrivateKey::derive(suite, &[0, 1, 2, 3]).is_err());
        assert!(SignaturePrivateKey::generate(suite).is_err());
        assert!(suite.signature_scheme().is_err());
        assert!(suite.secret_size().is_err());
        assert!(suite.expand_with_label(&[0u8; 32], "test", &[], 32).is_err());
        assert!(suite.key_package_ref(b"value").is_err());
        assert!(suite.proposal_ref(b"value").is_err());

        let known = CipherSuite::X25519_AES128GCM_SHA256_Ed25519;
        let sk = HpkePrivateKey::generate(known).unwrap();
        assert!(sk.public_key.encrypt(suite, b"", b"", b"pt").is_err());
    }
}
