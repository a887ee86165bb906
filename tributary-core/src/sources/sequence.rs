use std::sync::atomic::{AtomicI64, Ordering};

use crossbeam::utils::CachePadded;

use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

/// Infinite arithmetic progression `start, start + step, start + 2 * step, ...`
///
/// Arithmetic wraps on overflow: stepping past `i64::MAX` continues at
/// `i64::MIN` and the other way round.
///
#[derive(Debug, Clone)]
pub struct Sequence {
    next: i64,
    step: i64,
}

pub fn sequence(start: i64, step: i64) -> Sequence {
    Sequence { next: start, step }
}

impl Pull for Sequence {
    type Item = i64;

    #[inline]
    fn pull(&mut self) -> Result<i64, Stop> {
        let value = self.next;
        self.next = value.wrapping_add(self.step);
        Ok(value)
    }
}

/// Concurrent-safe [`Sequence`].
///
/// The running value lives in one atomic; `fetch_add` hands out each value
/// once and wraps on overflow like the sequential variant.
///
#[derive(Debug)]
pub struct SequenceSafe {
    next: CachePadded<AtomicI64>,
    step: i64,
}

pub fn sequence_safe(start: i64, step: i64) -> SequenceSafe {
    SequenceSafe {
        next: CachePadded::new(AtomicI64::new(start)),
        step,
    }
}

impl SyncPull for SequenceSafe {
    type Item = i64;

    #[inline]
    fn pull(&self) -> Result<i64, Stop> {
        Ok(self.next.fetch_add(self.step, Ordering::Relaxed))
    }
}

impl Pull for SequenceSafe {
    type Item = i64;

    #[inline]
    fn pull(&mut self) -> Result<i64, Stop> {
        SyncPull::pull(&*self)
    }
}
