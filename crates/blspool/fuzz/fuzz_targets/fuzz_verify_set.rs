//! Fuzz target for single-set verification.
//!
//! Exercises the decode-and-verify path with adversarial bytes: it must
//! never panic, and must be deterministic for identical input.

#![no_main]

use blspool::domain::bls::verify_set;
use blspool::{BlsPublicKey, BlsSignature, SignatureSet};
use libfuzzer_sys::fuzz_target;

/// Fuzz input for one signature set.
#[derive(Debug, arbitrary::Arbitrary)]
struct SetFuzzInput {
    /// Message digest
    message: [u8; 32],
    /// Signature bytes (48 bytes, G1 compressed)
    signature_bytes: [u8; 48],
    /// Public key bytes (96 bytes, G2 compressed)
    pubkey_bytes: [u8; 96],
}

fuzz_target!(|input: SetFuzzInput| {
    let set = SignatureSet {
        public_key: BlsPublicKey {
            bytes: input.pubkey_bytes,
        },
        message: input.message,
        signature: BlsSignature {
            bytes: input.signature_bytes,
        },
    };

    // Must never panic, regardless of input.
    let result = verify_set(&set);

    // And must be deterministic.
    let again = verify_set(&set);
    assert_eq!(result, again);
});
