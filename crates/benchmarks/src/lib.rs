//! Shared fixtures for the verification benchmarks.

use blst::min_sig::SecretKey;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use blspool::{BlsPublicKey, BlsSignature, MessageDigest, SignatureSet, DST};

/// Deterministically generate `count` distinct valid signature sets.
pub fn valid_sets(count: usize) -> Vec<SignatureSet> {
    let mut rng = StdRng::seed_from_u64(0xb15_b001);
    (0..count)
        .map(|i| {
            let mut message: MessageDigest = [0u8; 32];
            message[..8].copy_from_slice(&(i as u64).to_le_bytes());

            let mut ikm = [0u8; 32];
            rng.fill_bytes(&mut ikm);
            let sk = SecretKey::key_gen(&ikm, &[]).expect("ikm is 32 bytes");
            let pk = sk.sk_to_pk();
            let sig = sk.sign(&message, DST, &[]);

            SignatureSet {
                public_key: BlsPublicKey {
                    bytes: pk.to_bytes(),
                },
                message,
                signature: BlsSignature {
                    bytes: sig.to_bytes(),
                },
            }
        })
        .collect()
}
