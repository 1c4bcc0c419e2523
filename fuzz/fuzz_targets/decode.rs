#![no_main]

use libfuzzer_sys::fuzz_target;

use mls_crypto::{CipherSuite, HpkeCiphertext, HpkePublicKey, SignaturePublicKey};

// Top-level decoding must reject arbitrary input without panicking.
fuzz_target!(|data: &[u8]| {
    let _ = mls_codec::get::<HpkePublicKey>(data);
    let _ = mls_codec::get::<SignaturePublicKey>(data);
    let _ = mls_codec::get::<HpkeCiphertext>(data);
    let _ = mls_codec::get::<CipherSuite>(data);
});
