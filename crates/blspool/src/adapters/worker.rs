//! # Verification Worker
//!
//! Single-threaded cooperative runtime around the engine: requests arrive on
//! a bounded channel, are processed strictly FIFO, and reply over oneshot
//! channels. A panic inside verification fails the whole request with
//! `Internal` on every index instead of killing the worker; the caller
//! retries at a higher level. Parallelism across requests comes from running
//! several workers, each owning an independent service.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use blspool_telemetry::metrics::{
    BATCH_RETRIES, BATCH_SIGS_SUCCESS, JOB_RESULTS, REQUEST_DURATION,
};

use crate::cancel::CancelSignal;
use crate::clock::{Clock, MonotonicClock};
use crate::domain::entities::{
    JobResult, RequestMetrics, VerificationJob, VerificationReport,
};
use crate::domain::errors::VerifyError;
use crate::ports::inbound::{BatchVerificationApi, JobSubmitter, SubmitError};

/// Default bound on queued requests per worker.
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

/// One queued request: the jobs plus the channel the report goes back on.
struct WorkRequest {
    jobs: Vec<VerificationJob>,
    reply: oneshot::Sender<VerificationReport>,
}

// =============================================================================
// Worker
// =============================================================================

/// The worker task: owns the engine and drains its request queue.
pub struct VerificationWorker<A> {
    api: Arc<A>,
    requests: mpsc::Receiver<WorkRequest>,
    cancel: CancelSignal,
}

impl<A: BatchVerificationApi + 'static> VerificationWorker<A> {
    /// Drain the queue until every [`WorkerHandle`] is dropped.
    pub async fn run(mut self) {
        info!("verification worker started");

        while let Some(request) = self.requests.recv().await {
            // A raised signal belongs to the previous request only.
            self.cancel.reset();

            let report = self.process(request.jobs);
            record_request(&report);

            if request.reply.send(report).is_err() {
                warn!("verification report dropped, caller went away");
            }
        }

        info!("verification worker stopped");
    }

    fn process(&self, jobs: Vec<VerificationJob>) -> VerificationReport {
        let job_count = jobs.len();
        let api = Arc::clone(&self.api);
        let cancel = self.cancel.clone();

        match catch_unwind(AssertUnwindSafe(move || api.verify_jobs(&jobs, &cancel))) {
            Ok(report) => report,
            Err(_) => {
                error!(jobs = job_count, "verification panicked, failing the request");
                internal_failure_report(job_count)
            }
        }
    }
}

/// Request-wide failure: every index carries the same `Internal` error.
fn internal_failure_report(job_count: usize) -> VerificationReport {
    let now = MonotonicClock.now_micros();
    VerificationReport {
        results: vec![
            JobResult::Error(VerifyError::Internal(
                "verification worker panicked".into(),
            ));
            job_count
        ],
        metrics: RequestMetrics {
            batch_retries: 0,
            batch_sigs_success: 0,
            worker_start_us: now,
            worker_end_us: now,
        },
    }
}

fn record_request(report: &VerificationReport) {
    BATCH_RETRIES.inc_by(report.metrics.batch_retries as f64);
    BATCH_SIGS_SUCCESS.inc_by(report.metrics.batch_sigs_success as f64);

    for verdict in &report.results {
        let outcome = match verdict {
            JobResult::Success(true) => "valid",
            JobResult::Success(false) => "invalid",
            JobResult::Error(_) => "error",
        };
        JOB_RESULTS.with_label_values(&[outcome]).inc();
    }

    let span_us = report
        .metrics
        .worker_end_us
        .saturating_sub(report.metrics.worker_start_us);
    REQUEST_DURATION.observe(span_us as f64 / 1_000_000.0);

    debug!(
        jobs = report.results.len(),
        batch_retries = report.metrics.batch_retries,
        batch_sigs_success = report.metrics.batch_sigs_success,
        span_us,
        "request verified"
    );
}

// =============================================================================
// Handle
// =============================================================================

/// Caller-side handle: submit requests, cancel the in-flight one.
#[derive(Clone)]
pub struct WorkerHandle {
    requests: mpsc::Sender<WorkRequest>,
    cancel: CancelSignal,
}

impl WorkerHandle {
    /// Raise the cancellation signal for the request currently being
    /// verified. Jobs not yet verified report `Cancelled`; finished verdicts
    /// are kept. The signal clears itself when the next request begins.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

#[async_trait]
impl JobSubmitter for WorkerHandle {
    async fn submit(&self, jobs: Vec<VerificationJob>) -> Result<VerificationReport, SubmitError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(WorkRequest { jobs, reply })
            .await
            .map_err(|_| SubmitError::WorkerUnavailable)?;
        response.await.map_err(|_| SubmitError::WorkerUnavailable)
    }
}

/// Spawn a worker around `api` with the given queue depth.
///
/// Returns the caller handle and the worker's join handle. The worker exits
/// once every clone of the handle has been dropped.
pub fn spawn_worker<A: BatchVerificationApi + 'static>(
    api: A,
    queue_depth: usize,
) -> (WorkerHandle, JoinHandle<()>) {
    let (requests, receiver) = mpsc::channel(queue_depth.max(1));
    let cancel = CancelSignal::new();

    let worker = VerificationWorker {
        api: Arc::new(api),
        requests: receiver,
        cancel: cancel.clone(),
    };
    let join = tokio::spawn(worker.run());

    (WorkerHandle { requests, cancel }, join)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Approves every job; records the cancel state seen at entry.
    struct EchoApi {
        seen_cancelled: Arc<Mutex<Vec<bool>>>,
    }

    impl EchoApi {
        fn new() -> Self {
            Self {
                seen_cancelled: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl BatchVerificationApi for EchoApi {
        fn verify_jobs(
            &self,
            jobs: &[VerificationJob],
            cancel: &CancelSignal,
        ) -> VerificationReport {
            self.seen_cancelled.lock().unwrap().push(cancel.is_cancelled());
            VerificationReport {
                results: vec![JobResult::Success(true); jobs.len()],
                metrics: RequestMetrics::default(),
            }
        }
    }

    /// Panics on the first request, then behaves.
    struct FlakyApi {
        calls: AtomicUsize,
    }

    impl BatchVerificationApi for FlakyApi {
        fn verify_jobs(
            &self,
            jobs: &[VerificationJob],
            _cancel: &CancelSignal,
        ) -> VerificationReport {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("first request always fails");
            }
            VerificationReport {
                results: vec![JobResult::Success(true); jobs.len()],
                metrics: RequestMetrics::default(),
            }
        }
    }

    fn jobs(count: usize) -> Vec<VerificationJob> {
        use crate::domain::entities::{BlsPublicKey, BlsSignature, SignatureSet};
        let set = SignatureSet {
            public_key: BlsPublicKey { bytes: [0u8; 96] },
            message: [1u8; 32],
            signature: BlsSignature { bytes: [0u8; 48] },
        };
        (0..count)
            .map(|_| VerificationJob::batchable(vec![set.clone()]))
            .collect()
    }

    #[tokio::test]
    async fn test_submit_round_trip() {
        let (handle, _join) = spawn_worker(EchoApi::new(), DEFAULT_QUEUE_DEPTH);

        let report = handle.submit(jobs(3)).await.unwrap();
        assert_eq!(report.results.len(), 3);
        assert!(report.results.iter().all(JobResult::is_valid));
    }

    #[tokio::test]
    async fn test_requests_are_processed_fifo() {
        let (handle, _join) = spawn_worker(EchoApi::new(), 2);

        for count in [1usize, 4, 2] {
            let report = handle.submit(jobs(count)).await.unwrap();
            assert_eq!(report.results.len(), count);
        }
    }

    #[tokio::test]
    async fn test_panic_fails_request_but_not_worker() {
        let (handle, _join) = spawn_worker(
            FlakyApi {
                calls: AtomicUsize::new(0),
            },
            DEFAULT_QUEUE_DEPTH,
        );

        let failed = handle.submit(jobs(2)).await.unwrap();
        assert_eq!(failed.results.len(), 2);
        for verdict in &failed.results {
            assert!(matches!(verdict, JobResult::Error(VerifyError::Internal(_))));
        }

        // The worker survives and serves the next request.
        let ok = handle.submit(jobs(1)).await.unwrap();
        assert!(ok.results[0].is_valid());
    }

    #[tokio::test]
    async fn test_cancel_signal_is_reset_between_requests() {
        let api = EchoApi::new();
        let seen = Arc::clone(&api.seen_cancelled);
        let (handle, _join) = spawn_worker(api, DEFAULT_QUEUE_DEPTH);

        // Raised before the request starts: the worker lowers it at entry.
        handle.cancel();
        let report = handle.submit(jobs(1)).await.unwrap();
        assert!(report.results[0].is_valid());
        assert_eq!(seen.lock().unwrap().as_slice(), &[false]);
    }

    #[tokio::test]
    async fn test_submit_after_worker_stops_is_an_error() {
        let (handle, join) = spawn_worker(EchoApi::new(), DEFAULT_QUEUE_DEPTH);
        join.abort();
        let _ = join.await;

        let result = handle.submit(jobs(1)).await;
        assert!(matches!(result, Err(SubmitError::WorkerUnavailable)));
    }
}
