//! Monotonic clock abstraction.
//!
//! The engine stamps requests on an injected clock rather than reading
//! ambient time, so tests can fix timestamps and reports stay deterministic.

use std::sync::OnceLock;
use std::time::Instant;

/// Source of monotonic microsecond timestamps.
pub trait Clock: Send + Sync {
    /// Microseconds since the clock's origin. Never decreases.
    fn now_micros(&self) -> u64;
}

/// Production clock: microseconds since the first reading in this process,
/// so timestamps are comparable across workers and requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

static ORIGIN: OnceLock<Instant> = OnceLock::new();

impl Clock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        let origin = *ORIGIN.get_or_init(Instant::now);
        origin.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::Clock;

    /// Test clock that advances by a fixed step on every reading.
    #[derive(Debug, Default)]
    pub struct SteppingClock {
        now: AtomicU64,
        step: u64,
    }

    impl SteppingClock {
        pub fn with_step(step: u64) -> Self {
            Self {
                now: AtomicU64::new(0),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now_micros(&self) -> u64 {
            self.now.fetch_add(self.step, Ordering::Relaxed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock;
        let a = clock.now_micros();
        let b = clock.now_micros();
        assert!(b >= a);
    }

    #[test]
    fn test_two_instances_share_an_origin() {
        let a = MonotonicClock.now_micros();
        let b = MonotonicClock.now_micros();
        assert!(b >= a);
    }
}
