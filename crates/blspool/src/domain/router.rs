//! # Job Router
//!
//! Splits a request into batchable and non-batchable streams.

use super::entities::VerificationJob;

/// Partition job indices by the caller's `batchable` flag, preserving input
/// order inside each stream. Jobs with no sets are routed to neither stream;
/// the service rejects them before verification starts.
pub fn split_by_batchable(jobs: &[VerificationJob]) -> (Vec<usize>, Vec<usize>) {
    let mut batchable = Vec::new();
    let mut non_batchable = Vec::new();

    for (index, job) in jobs.iter().enumerate() {
        if job.sets.is_empty() {
            continue;
        }
        if job.batchable {
            batchable.push(index);
        } else {
            non_batchable.push(index);
        }
    }

    (batchable, non_batchable)
}
