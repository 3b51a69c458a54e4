//! Cooperative cancellation signal shared between a worker and its host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheap, cloneable cancellation flag.
///
/// The host raises it with [`cancel`](Self::cancel); the engine polls it at
/// its suspension points. The owning worker resets it when a new request
/// begins, so a raised signal affects exactly the in-flight request.
#[derive(Clone, Debug, Default)]
pub struct CancelSignal(Arc<AtomicBool>);

impl CancelSignal {
    /// A fresh, unraised signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether the signal has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Lower the signal for the next request.
    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_starts_lowered() {
        assert!(!CancelSignal::new().is_cancelled());
    }

    #[test]
    fn test_cancel_is_visible_to_clones() {
        let signal = CancelSignal::new();
        let observer = signal.clone();
        signal.cancel();
        assert!(observer.is_cancelled());

        observer.reset();
        assert!(!signal.is_cancelled());
    }
}
