#![forbid(unsafe_code)]

//! Cooperative cancellation for timers and subscriptions.
//!
//! A [`Canceller`] / [`CancelToken`] pair is the sole cancellation
//! mechanism in the runtime: the control side cancels, the observing side
//! polls or waits. Cancelling is idempotent and wakes any blocked waiter,
//! so teardown can always fire it unconditionally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use web_time::{Duration, Instant};

struct Shared {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
}

/// Control side of a cancellation pair.
///
/// Dropping the canceller does not cancel; teardown paths call
/// [`cancel`](Self::cancel) explicitly so the behavior is visible at the
/// call site.
pub struct Canceller {
    shared: Arc<Shared>,
}

/// Observer side of a cancellation pair. Cheap to clone and share.
#[derive(Clone)]
pub struct CancelToken {
    shared: Arc<Shared>,
}

impl Canceller {
    /// Create a fresh pair.
    #[must_use]
    pub fn new() -> (Self, CancelToken) {
        let shared = Arc::new(Shared {
            cancelled: AtomicBool::new(false),
            lock: Mutex::new(()),
            wake: Condvar::new(),
        });
        (
            Self {
                shared: Arc::clone(&shared),
            },
            CancelToken { shared },
        )
    }

    /// Request cancellation. Safe to call any number of times; every
    /// token observes it and pending waits wake.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::Release);
        let _guard = self.shared.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.shared.wake.notify_all();
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::Acquire)
    }
}

impl CancelToken {
    /// Whether cancellation has been requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::Acquire)
    }

    /// Block for up to `timeout`, waking early on cancellation.
    ///
    /// Returns `true` if cancelled, `false` if the timeout elapsed. This
    /// is the wait primitive timers are built on: "sleep one period
    /// unless cancelled".
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let start = Instant::now();
        let mut guard = self.shared.lock.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if self.is_cancelled() {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return false;
            }
            let (next, _result) = self
                .shared
                .wake
                .wait_timeout(guard, timeout - elapsed)
                .unwrap_or_else(|e| e.into_inner());
            guard = next;
        }
    }
}
