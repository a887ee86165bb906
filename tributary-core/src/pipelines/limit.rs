use std::sync::atomic::{AtomicI64, Ordering};

use crossbeam::utils::CachePadded;

use crate::pull::{Pull, SyncPull};
use crate::stop::{Stop, StopLatch};

// ============================================================================
// Limit - sequential
// ============================================================================

/// Stage delivering at most `n` elements of its upstream.
///
/// A non-positive `n` delivers nothing. The count is checked before pulling,
/// so the upstream is never pulled once the limit is reached. Any stop,
/// whether the limit or an upstream stop, is kept and reported by every later
/// pull.
///
pub struct Limit<I> {
    upstream: I,
    remaining: u64,
    stopped: Option<Stop>,
}

pub fn limit<I: Pull>(upstream: I, n: i64) -> Limit<I> {
    Limit {
        upstream,
        remaining: u64::try_from(n).unwrap_or(0),
        stopped: None,
    }
}

impl<I: Pull> Limit<I> {
    fn stop(&mut self, stop: Stop) -> Stop {
        self.stopped = Some(stop.clone());
        stop
    }
}

impl<I: Pull> Pull for Limit<I> {
    type Item = I::Item;

    fn pull(&mut self) -> Result<I::Item, Stop> {
        if let Some(stop) = &self.stopped {
            return Err(stop.clone());
        }

        if self.remaining == 0 {
            return Err(self.stop(Stop::Exhausted));
        }

        match self.upstream.pull() {
            Ok(value) => {
                self.remaining -= 1;
                Ok(value)
            }
            Err(stop) => Err(self.stop(stop)),
        }
    }
}

// ============================================================================
// LimitSafe - concurrent
// ============================================================================

/// Concurrent-safe [`Limit`].
///
/// Every pull takes a permit with `fetch_sub` before touching the upstream.
/// A thread that finds no permit left latches `Stop::Exhausted` and returns
/// without pulling, so no thread pulls an element it cannot deliver. Exactly
/// `min(n, upstream length)` elements are delivered in total, and they are the
/// first ones the upstream hands out.
///
pub struct LimitSafe<I> {
    upstream: I,
    permits: CachePadded<AtomicI64>,
    latch: StopLatch,
}

pub fn limit_safe<I: SyncPull>(upstream: I, n: i64) -> LimitSafe<I> {
    LimitSafe {
        upstream,
        permits: CachePadded::new(AtomicI64::new(n.max(0))),
        latch: StopLatch::new(),
    }
}

impl<I: SyncPull> SyncPull for LimitSafe<I> {
    type Item = I::Item;

    fn pull(&self) -> Result<I::Item, Stop> {
        self.latch.check()?;

        // The latch is checked first, so each thread overdraws the permits at
        // most once and the counter cannot run down to i64::MIN.
        //
        if self.permits.fetch_sub(1, Ordering::AcqRel) <= 0 {
            return Err(self.latch.trip(Stop::Exhausted));
        }

        self.upstream.pull().map_err(|stop| self.latch.trip(stop))
    }
}

impl<I: SyncPull> Pull for LimitSafe<I> {
    type Item = I::Item;

    #[inline]
    fn pull(&mut self) -> Result<I::Item, Stop> {
        SyncPull::pull(&*self)
    }
}
