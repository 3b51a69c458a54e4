//! # BLS Verification (BLS12-381)
//!
//! Pure cryptographic logic wrapping `blst`, no I/O.
//!
//! Uses the `min_sig` variant: signatures on G1 (48 bytes compressed),
//! public keys on G2 (96 bytes compressed). Multi-set verification uses
//! `blst`'s randomized aggregate check: each set is weighted by a fresh
//! non-zero 64-bit scalar so that one pairing equation decides the
//! conjunction with negligible soundness error, and duplicate messages
//! across sets cannot cancel each other out.

use blst::min_sig::{AggregatePublicKey, AggregateSignature, PublicKey, Signature};
use blst::{blst_scalar, BLST_ERROR};
use rand::Rng;

use super::entities::{BlsPublicKey, BlsSignature, SignatureSet};
use super::errors::VerifyError;
use crate::ports::outbound::SignaturePrimitive;

/// Domain Separation Tag for G1 signatures, hash-to-curve per the BLS
/// signature draft. Callers must have signed under the same tag.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// Bits of randomness per set in the multi-set check.
const RAND_BITS: usize = 64;

/// Verify a single signature set.
///
/// # Returns
/// * `Ok(true)` — the signature is valid for the message under the key.
/// * `Ok(false)` — the inputs decoded but the pairing check failed.
/// * `Err(VerifyError::InvalidInput)` — a point failed to decode, is not in
///   the prime-order subgroup, or the public key is the identity.
pub fn verify_set(set: &SignatureSet) -> Result<bool, VerifyError> {
    let pk = decode_public_key(&set.public_key)?;
    let sig = decode_signature(&set.signature)?;

    map_verify(sig.verify(true, &set.message, DST, &[], &pk, true))
}

/// Verify several signature sets as a conjunction.
///
/// `Ok(true)` iff *all* sets verify; `Ok(false)` iff at least one does not.
/// Semantically equivalent to verifying each set on its own, modulo the
/// negligible soundness error of randomization.
///
/// A single-set slice short-circuits to [`verify_set`]; an empty slice is a
/// caller bug and reported as `InvalidInput`.
pub fn verify_many(sets: &[SignatureSet]) -> Result<bool, VerifyError> {
    match sets {
        [] => Err(VerifyError::InvalidInput),
        [single] => verify_set(single),
        _ => {
            let mut pks = Vec::with_capacity(sets.len());
            let mut sigs = Vec::with_capacity(sets.len());
            let mut msgs: Vec<&[u8]> = Vec::with_capacity(sets.len());

            for set in sets {
                pks.push(decode_public_key(&set.public_key)?);
                sigs.push(decode_signature(&set.signature)?);
                msgs.push(&set.message);
            }

            let pk_refs: Vec<&PublicKey> = pks.iter().collect();
            let sig_refs: Vec<&Signature> = sigs.iter().collect();
            let rands = random_scalars(sets.len());

            map_verify(Signature::verify_multiple_aggregate_signatures(
                &msgs, DST, &pk_refs, true, &sig_refs, true, &rands, RAND_BITS,
            ))
        }
    }
}

/// Aggregate multiple signatures over the same message into one.
///
/// # Errors
/// * `InvalidInput` if the list is empty or any signature fails to decode.
pub fn aggregate_signatures(signatures: &[BlsSignature]) -> Result<BlsSignature, VerifyError> {
    if signatures.is_empty() {
        return Err(VerifyError::InvalidInput);
    }

    let parsed: Vec<Signature> = signatures
        .iter()
        .map(decode_signature)
        .collect::<Result<_, _>>()?;
    let refs: Vec<&Signature> = parsed.iter().collect();

    let aggregate = AggregateSignature::aggregate(&refs, false)
        .map_err(|e| VerifyError::PrimitiveFault(format!("{e:?}")))?;

    Ok(BlsSignature {
        bytes: aggregate.to_signature().to_bytes(),
    })
}

/// Aggregate multiple public keys into one, for sets whose signers all
/// signed the same message. Callers do this before submission so that a
/// shared-message group costs one set instead of many.
///
/// # Errors
/// * `InvalidInput` if the list is empty or any key fails to decode.
pub fn aggregate_public_keys(public_keys: &[BlsPublicKey]) -> Result<BlsPublicKey, VerifyError> {
    if public_keys.is_empty() {
        return Err(VerifyError::InvalidInput);
    }

    let parsed: Vec<PublicKey> = public_keys
        .iter()
        .map(decode_public_key)
        .collect::<Result<_, _>>()?;
    let refs: Vec<&PublicKey> = parsed.iter().collect();

    let aggregate = AggregatePublicKey::aggregate(&refs, false)
        .map_err(|e| VerifyError::PrimitiveFault(format!("{e:?}")))?;

    Ok(BlsPublicKey {
        bytes: aggregate.to_public_key().to_bytes(),
    })
}

/// The production crypto backend: `blst`-backed, stateless, thread-safe.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlstVerifier;

impl SignaturePrimitive for BlstVerifier {
    fn verify_set(&self, set: &SignatureSet) -> Result<bool, VerifyError> {
        verify_set(set)
    }

    fn verify_many(&self, sets: &[SignatureSet]) -> Result<bool, VerifyError> {
        verify_many(sets)
    }
}

fn decode_public_key(key: &BlsPublicKey) -> Result<PublicKey, VerifyError> {
    PublicKey::from_bytes(&key.bytes).map_err(|_| VerifyError::InvalidInput)
}

fn decode_signature(sig: &BlsSignature) -> Result<Signature, VerifyError> {
    Signature::from_bytes(&sig.bytes).map_err(|_| VerifyError::InvalidInput)
}

fn map_verify(err: BLST_ERROR) -> Result<bool, VerifyError> {
    match err {
        BLST_ERROR::BLST_SUCCESS => Ok(true),
        BLST_ERROR::BLST_VERIFY_FAIL => Ok(false),
        BLST_ERROR::BLST_BAD_ENCODING
        | BLST_ERROR::BLST_POINT_NOT_ON_CURVE
        | BLST_ERROR::BLST_POINT_NOT_IN_GROUP
        | BLST_ERROR::BLST_PK_IS_INFINITY => Err(VerifyError::InvalidInput),
        other => Err(VerifyError::PrimitiveFault(format!("{other:?}"))),
    }
}

/// Fresh non-zero 64-bit scalars, one per set. Zero would drop a set from
/// the check entirely.
fn random_scalars(count: usize) -> Vec<blst_scalar> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let mut word: u64 = 0;
            while word == 0 {
                word = rng.gen();
            }
            let mut b = [0u8; 32];
            b[..8].copy_from_slice(&word.to_le_bytes());
            blst_scalar { b }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_helpers::{generate_keypair, invalid_set, sign_digest, valid_set};
    use super::*;

    #[test]
    fn test_verify_set_valid() {
        let set = valid_set([3u8; 32]);
        assert_eq!(verify_set(&set), Ok(true));
    }

    #[test]
    fn test_verify_set_wrong_message() {
        let set = invalid_set([3u8; 32]);
        assert_eq!(verify_set(&set), Ok(false));
    }

    #[test]
    fn test_verify_set_wrong_key() {
        let mut set = valid_set([5u8; 32]);
        let (_, other_pk) = generate_keypair();
        set.public_key = other_pk;
        assert_eq!(verify_set(&set), Ok(false));
    }

    #[test]
    fn test_verify_set_garbage_signature_is_invalid_input() {
        let mut set = valid_set([5u8; 32]);
        set.signature.bytes = [0xffu8; 48];
        assert_eq!(verify_set(&set), Err(VerifyError::InvalidInput));
    }

    #[test]
    fn test_verify_many_all_valid() {
        let sets: Vec<_> = (0u8..5).map(|i| valid_set([i; 32])).collect();
        assert_eq!(verify_many(&sets), Ok(true));
    }

    #[test]
    fn test_verify_many_one_bad_fails_conjunction() {
        let mut sets: Vec<_> = (0u8..5).map(|i| valid_set([i; 32])).collect();
        sets[2] = invalid_set([2u8; 32]);
        assert_eq!(verify_many(&sets), Ok(false));
    }

    #[test]
    fn test_verify_many_tolerates_duplicate_messages() {
        // Same digest in every set; randomization keeps the conjunction sound.
        let sets: Vec<_> = (0..4).map(|_| valid_set([9u8; 32])).collect();
        assert_eq!(verify_many(&sets), Ok(true));

        let mut sets = sets;
        sets[1] = invalid_set([9u8; 32]);
        assert_eq!(verify_many(&sets), Ok(false));
    }

    #[test]
    fn test_verify_many_empty_is_invalid_input() {
        assert_eq!(verify_many(&[]), Err(VerifyError::InvalidInput));
    }

    #[test]
    fn test_verify_many_single_set_delegates() {
        let set = valid_set([8u8; 32]);
        assert_eq!(verify_many(std::slice::from_ref(&set)), Ok(true));
    }

    #[test]
    fn test_aggregate_signatures_and_keys_verify_as_one_set() {
        let message = [6u8; 32];
        let mut signatures = Vec::new();
        let mut keys = Vec::new();
        for _ in 0..5 {
            let (sk, pk) = generate_keypair();
            signatures.push(sign_digest(&sk, &message));
            keys.push(pk);
        }

        let set = SignatureSet {
            public_key: aggregate_public_keys(&keys).unwrap(),
            message,
            signature: aggregate_signatures(&signatures).unwrap(),
        };
        assert_eq!(verify_set(&set), Ok(true));
    }

    #[test]
    fn test_aggregate_empty_fails() {
        assert_eq!(aggregate_signatures(&[]), Err(VerifyError::InvalidInput));
        assert_eq!(aggregate_public_keys(&[]), Err(VerifyError::InvalidInput));
    }
}
