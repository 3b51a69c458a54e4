//! # Inbound Ports
//!
//! Trait definitions for how consumers drive the engine.

use async_trait::async_trait;
use thiserror::Error;

use crate::cancel::CancelSignal;
use crate::domain::entities::{VerificationJob, VerificationReport};

/// The verification engine itself: synchronous, compute-bound, request-scoped.
///
/// One call verifies one request. The report's `results` vector matches the
/// submitted jobs index-for-index; metrics are scoped to the call.
pub trait BatchVerificationApi: Send + Sync {
    /// Run the full verification state machine over `jobs`.
    ///
    /// `cancel` is polled between chunks and between individual jobs; once it
    /// fires, every not-yet-verified job reports
    /// [`VerifyError::Cancelled`](crate::domain::errors::VerifyError::Cancelled)
    /// while already-computed verdicts are kept.
    fn verify_jobs(&self, jobs: &[VerificationJob], cancel: &CancelSignal) -> VerificationReport;
}

/// Errors surfaced to callers submitting into a worker.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The worker task is gone; its queue is closed.
    #[error("Verification worker unavailable")]
    WorkerUnavailable,
}

/// Asynchronous submission into a verification worker.
///
/// Implemented by [`WorkerHandle`](crate::adapters::worker::WorkerHandle);
/// consumers depend on this trait so tests can substitute a scripted worker.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    /// Enqueue a request and await its report.
    async fn submit(&self, jobs: Vec<VerificationJob>) -> Result<VerificationReport, SubmitError>;
}
