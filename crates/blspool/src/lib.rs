//! # blspool
//!
//! Batch BLS12-381 signature verification for consensus workloads.
//!
//! Gossip, sync and block processing produce a bursty stream of independent
//! verification jobs, each a conjunction of `(aggregate public key, message
//! digest, signature)` sets. Verifying sets one by one wastes the pairing
//! speedup of randomized multi-set verification; batching everything lets a
//! single bad signature poison an arbitrarily large batch. This crate sits
//! in between:
//!
//! - batchable jobs are grouped into chunks of at least
//!   [`config::DEFAULT_MIN_SETS_PER_CHUNK`] sets and verified with one
//!   randomized aggregate check per chunk;
//! - a chunk that fails or errors is demoted, and its jobs are re-verified
//!   individually, so every caller still gets a precise per-job verdict;
//! - verdicts come back in submission order together with request metrics.
//!
//! ## Architecture
//!
//! Hexagonal:
//! - **Domain** (`domain/`): pure logic — the blst primitive, the chunker,
//!   the router, entities and errors. No I/O.
//! - **Ports** (`ports/`): the [`BatchVerificationApi`] and [`JobSubmitter`]
//!   inbound seams and the [`SignaturePrimitive`] crypto seam.
//! - **Service** (`service.rs`): the verification state machine.
//! - **Adapters** (`adapters/`): the FIFO worker runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blspool::{
//!     spawn_worker, BatchVerificationService, BlstVerifier, JobSubmitter,
//!     VerifierConfig, DEFAULT_QUEUE_DEPTH,
//! };
//!
//! let service = BatchVerificationService::new(BlstVerifier, VerifierConfig::from_env());
//! let (handle, _worker) = spawn_worker(service, DEFAULT_QUEUE_DEPTH);
//!
//! let report = handle.submit(jobs).await?;
//! ```

pub mod adapters;
pub mod cancel;
pub mod clock;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::worker::{spawn_worker, VerificationWorker, WorkerHandle, DEFAULT_QUEUE_DEPTH};
pub use cancel::CancelSignal;
pub use clock::{Clock, MonotonicClock};
pub use config::{VerifierConfig, DEFAULT_MIN_SETS_PER_CHUNK};
pub use domain::bls::{aggregate_public_keys, aggregate_signatures, BlstVerifier, DST};
pub use domain::entities::{
    BlsPublicKey, BlsSignature, JobResult, MessageDigest, RequestMetrics, SignatureSet,
    VerificationJob, VerificationReport,
};
pub use domain::errors::VerifyError;
pub use ports::inbound::{BatchVerificationApi, JobSubmitter, SubmitError};
pub use ports::outbound::SignaturePrimitive;
pub use service::BatchVerificationService;
