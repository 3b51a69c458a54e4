//! # Outbound Ports
//!
//! Seam between the engine and the cryptography layer.

use crate::domain::entities::SignatureSet;
use crate::domain::errors::VerifyError;

/// The crypto backend the engine verifies against.
///
/// Implementations must be stateless across calls, thread-safe, and
/// compute-bound: `Ok(false)` means "verified, answer is no", `Err` means
/// the answer could not be computed. Any BLS12-381 library with randomized
/// multi-set aggregate verification satisfies this contract; the production
/// implementation is [`crate::domain::bls::BlstVerifier`].
pub trait SignaturePrimitive: Send + Sync {
    /// Verify one set.
    fn verify_set(&self, set: &SignatureSet) -> Result<bool, VerifyError>;

    /// Verify several sets as a conjunction: `Ok(true)` iff all verify.
    /// Must be semantically equivalent to per-set verification, modulo a
    /// negligible soundness error from randomization.
    fn verify_many(&self, sets: &[SignatureSet]) -> Result<bool, VerifyError>;
}
