//! # Domain Entities
//!
//! Core data structures for batch signature verification.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

use super::errors::VerifyError;

/// 32-byte message digest, domain-separated by the caller.
pub type MessageDigest = [u8; 32];

// =============================================================================
// BLS Types (BLS12-381, min_sig variant)
// =============================================================================

/// BLS signature (G1 point, compressed, 48 bytes).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsSignature {
    /// Compressed G1 point.
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 48],
}

/// BLS public key (G2 point, compressed, 96 bytes).
///
/// When several signers signed the same message, the caller aggregates their
/// keys into one before building a [`SignatureSet`].
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsPublicKey {
    /// Compressed G2 point.
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 96],
}

// =============================================================================
// Verification Jobs
// =============================================================================

/// The atomic verification unit: one key (possibly an aggregate), one message
/// digest, one signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSet {
    /// Aggregate public key of the signer(s).
    pub public_key: BlsPublicKey,
    /// Message digest that was signed.
    pub message: MessageDigest,
    /// Signature over the digest.
    pub signature: BlsSignature,
}

/// A caller-submitted job: valid iff **every** set verifies. There are no
/// partial semantics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationJob {
    /// The sets making up the conjunction. Must be non-empty.
    pub sets: Vec<SignatureSet>,
    /// Caller assertion that this job's sets may be interleaved with sets from
    /// other jobs inside a single randomized multi-set verification call.
    pub batchable: bool,
}

impl VerificationJob {
    /// A job whose sets may share a batch with other jobs.
    pub fn batchable(sets: Vec<SignatureSet>) -> Self {
        Self {
            sets,
            batchable: true,
        }
    }

    /// A job that must be verified on its own.
    pub fn unbatchable(sets: Vec<SignatureSet>) -> Self {
        Self {
            sets,
            batchable: false,
        }
    }

    /// Number of sets in this job; the job's weight for chunking purposes.
    pub fn weight(&self) -> usize {
        self.sets.len()
    }
}

// =============================================================================
// Results
// =============================================================================

/// Per-job verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobResult {
    /// Verification ran to completion. `true` iff every set verified.
    Success(bool),
    /// Verification could not be performed for this job.
    Error(VerifyError),
}

impl JobResult {
    /// `true` only for a job whose every set verified.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Success(true))
    }
}

/// Counters and timestamps for one request.
///
/// Timestamps are microseconds on the engine's monotonic clock; they order
/// and measure spans, they are not wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestMetrics {
    /// Chunks whose batch verification returned `false` or errored and were
    /// demoted to per-job verification.
    pub batch_retries: u64,
    /// Sets admitted through a successful batch call. Demoted chunks
    /// contribute nothing, even if their jobs later pass individually.
    pub batch_sigs_success: u64,
    /// Monotonic timestamp at request entry.
    pub worker_start_us: u64,
    /// Monotonic timestamp just before the report is returned.
    pub worker_end_us: u64,
}

/// Outcome of one request: a verdict per submitted job, index-for-index,
/// plus the request's metrics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    /// `results[i]` is the verdict for the i-th submitted job.
    pub results: Vec<JobResult>,
    /// Request-scoped counters and timestamps.
    pub metrics: RequestMetrics,
}
