//! # Batch Verification Service
//!
//! The verification state machine wiring the domain pieces together:
//!
//! ```text
//! jobs ──► route ──► chunk ──► batch try ──► ok? ──yes──► mark valid
//!             │                               │
//!             │                               no / error
//!             │                               ▼
//!             └──► non-batchable ──► verify individually ──► assemble
//! ```
//!
//! A failed or erroring batch never surfaces to the caller: its jobs are
//! demoted to per-job verification, which is authoritative. Metrics count
//! demotions and batch-admitted sets so the chunk threshold can be tuned
//! against real traffic.

use tracing::{debug, warn};

use crate::cancel::CancelSignal;
use crate::clock::{Clock, MonotonicClock};
use crate::config::VerifierConfig;
use crate::domain::chunker::chunk_by_weight;
use crate::domain::entities::{
    JobResult, RequestMetrics, SignatureSet, VerificationJob, VerificationReport,
};
use crate::domain::errors::VerifyError;
use crate::domain::router::split_by_batchable;
use crate::ports::inbound::BatchVerificationApi;
use crate::ports::outbound::SignaturePrimitive;

/// Request-scoped batch verification engine.
///
/// Holds no mutable state between requests; identical inputs produce
/// identical reports regardless of host CPU count.
pub struct BatchVerificationService<P, C = MonotonicClock> {
    primitive: P,
    clock: C,
    min_sets_per_chunk: usize,
}

impl<P: SignaturePrimitive> BatchVerificationService<P> {
    /// Build a service on the production monotonic clock.
    pub fn new(primitive: P, config: VerifierConfig) -> Self {
        Self::with_clock(primitive, config, MonotonicClock)
    }
}

impl<P: SignaturePrimitive, C: Clock> BatchVerificationService<P, C> {
    /// Build a service with an injected clock. Out-of-range tunables are
    /// clamped rather than rejected.
    pub fn with_clock(primitive: P, config: VerifierConfig, clock: C) -> Self {
        let config = config.clamped();
        Self {
            primitive,
            clock,
            min_sets_per_chunk: config.min_sets_per_chunk,
        }
    }
}

impl<P: SignaturePrimitive, C: Clock> BatchVerificationApi for BatchVerificationService<P, C> {
    fn verify_jobs(&self, jobs: &[VerificationJob], cancel: &CancelSignal) -> VerificationReport {
        let worker_start_us = self.clock.now_micros();
        let mut results: Vec<Option<JobResult>> = vec![None; jobs.len()];
        let mut batch_retries = 0u64;
        let mut batch_sigs_success = 0u64;

        // A job asserting "all of nothing verifies" is a caller bug.
        for (index, job) in jobs.iter().enumerate() {
            if job.sets.is_empty() {
                results[index] = Some(JobResult::Error(VerifyError::InvalidInput));
            }
        }

        let (batchable, non_batchable) = split_by_batchable(jobs);
        let chunks = chunk_by_weight(batchable, |&index| jobs[index].weight(), self.min_sets_per_chunk);

        // Batch phase. Jobs from chunks that fail (or error) are queued for
        // individual verification ahead of the non-batchable stream.
        let mut individual: Vec<usize> = Vec::new();
        let mut cancelled = false;

        for chunk in &chunks {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let sets: Vec<SignatureSet> = chunk
                .iter()
                .flat_map(|&index| jobs[index].sets.iter().cloned())
                .collect();

            match self.primitive.verify_many(&sets) {
                Ok(true) => {
                    batch_sigs_success += sets.len() as u64;
                    for &index in chunk {
                        results[index] = Some(JobResult::Success(true));
                    }
                }
                Ok(false) => {
                    batch_retries += 1;
                    debug!(
                        jobs = chunk.len(),
                        sets = sets.len(),
                        "batch verification failed, retrying jobs individually"
                    );
                    individual.extend_from_slice(chunk);
                }
                // The batch primitive can reject inputs that single-set
                // verification reports differently; the individual pass is
                // authoritative, so errors demote exactly like a `false`.
                Err(error) => {
                    batch_retries += 1;
                    debug!(
                        %error,
                        jobs = chunk.len(),
                        "batch verification errored, retrying jobs individually"
                    );
                    individual.extend_from_slice(chunk);
                }
            }
        }

        individual.extend(non_batchable);

        // Individual phase.
        if !cancelled {
            for index in individual {
                if cancel.is_cancelled() {
                    cancelled = true;
                    break;
                }

                let verdict = match self.primitive.verify_many(&jobs[index].sets) {
                    Ok(valid) => JobResult::Success(valid),
                    Err(error) => {
                        warn!(%error, job = index, "individual verification failed");
                        JobResult::Error(error)
                    }
                };
                results[index] = Some(verdict);
            }
        }

        if cancelled {
            debug!("request cancelled, failing unverified jobs");
        }
        debug_assert!(cancelled || results.iter().all(Option::is_some));

        let results = results
            .into_iter()
            .map(|verdict| verdict.unwrap_or(JobResult::Error(VerifyError::Cancelled)))
            .collect();

        VerificationReport {
            results,
            metrics: RequestMetrics {
                batch_retries,
                batch_sigs_success,
                worker_start_us,
                worker_end_us: self.clock.now_micros(),
            },
        }
    }
}
