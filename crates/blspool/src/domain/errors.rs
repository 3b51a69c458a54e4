//! # Verification Errors
//!
//! Error taxonomy for the batch verification engine.
//!
//! A cryptographically invalid signature is **not** an error — it is reported
//! as `JobResult::Success(false)`. Errors mean the answer could not be
//! computed at all.

use thiserror::Error;

/// Errors that can occur while verifying a job.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// A signature set was malformed: undecodable point, point outside the
    /// prime-order subgroup, identity public key, or a job with no sets.
    #[error("Malformed signature set")]
    InvalidInput,

    /// The BLS backend raised an internal error during verification.
    #[error("BLS backend fault: {0}")]
    PrimitiveFault(String),

    /// The worker's cancellation signal fired before the job was verified.
    #[error("Verification cancelled")]
    Cancelled,

    /// The worker runtime failed while processing the request; every job in
    /// the request carries this error and the caller retries at a higher level.
    #[error("Verification worker failed: {0}")]
    Internal(String),
}
