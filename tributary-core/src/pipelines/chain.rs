use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::utils::CachePadded;
use tracing::trace;

use crate::pull::{Pull, SyncPull};
use crate::stop::{Stop, StopLatch};

// ============================================================================
// Chain - sequential
// ============================================================================

/// Stage yielding every element of each source in turn.
///
/// `Stop::Exhausted` from the current source moves on to the next one; the
/// chain itself is exhausted after the last source. A failure ends the chain.
///
pub struct Chain<I> {
    sources: Vec<I>,
    current: usize,
    stopped: Option<Stop>,
}

pub fn chain<I, S>(sources: S) -> Chain<I>
where
    I: Pull,
    S: IntoIterator<Item = I>,
{
    Chain {
        sources: sources.into_iter().collect(),
        current: 0,
        stopped: None,
    }
}

impl<I: Pull> Pull for Chain<I> {
    type Item = I::Item;

    fn pull(&mut self) -> Result<I::Item, Stop> {
        if let Some(stop) = &self.stopped {
            return Err(stop.clone());
        }

        while let Some(source) = self.sources.get_mut(self.current) {
            match source.pull() {
                Ok(value) => return Ok(value),
                Err(Stop::Exhausted) => {
                    self.current += 1;
                    trace!(source = self.current, "chain advanced");
                }
                Err(stop) => {
                    self.stopped = Some(stop.clone());
                    return Err(stop);
                }
            }
        }

        self.stopped = Some(Stop::Exhausted);
        Err(Stop::Exhausted)
    }
}

// ============================================================================
// ChainSafe - concurrent
// ============================================================================

/// Concurrent-safe [`Chain`].
///
/// Threads pull from the source at the shared index. A thread that sees the
/// source exhausted moves the index past it with a compare-and-swap; threads
/// that lose the race simply retry on the new index. Since an exhausted safe
/// source stays exhausted, no element is skipped or delivered twice.
///
pub struct ChainSafe<I> {
    sources: Box<[I]>,
    current: CachePadded<AtomicUsize>,
    latch: StopLatch,
}

pub fn chain_safe<I, S>(sources: S) -> ChainSafe<I>
where
    I: SyncPull,
    S: IntoIterator<Item = I>,
{
    ChainSafe {
        sources: sources.into_iter().collect(),
        current: CachePadded::new(AtomicUsize::new(0)),
        latch: StopLatch::new(),
    }
}

impl<I: SyncPull> SyncPull for ChainSafe<I> {
    type Item = I::Item;

    fn pull(&self) -> Result<I::Item, Stop> {
        self.latch.check()?;

        let mut index = self.current.load(Ordering::Acquire);
        while let Some(source) = self.sources.get(index) {
            match source.pull() {
                Ok(value) => return Ok(value),
                Err(Stop::Exhausted) => {
                    index = match self.current.compare_exchange(
                        index,
                        index + 1,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    ) {
                        Ok(_) => {
                            trace!(source = index + 1, "chain advanced");
                            index + 1
                        }
                        Err(observed) => observed,
                    };
                }
                Err(stop) => return Err(self.latch.trip(stop)),
            }
        }

        Err(self.latch.trip(Stop::Exhausted))
    }
}

impl<I: SyncPull> Pull for ChainSafe<I> {
    type Item = I::Item;

    #[inline]
    fn pull(&mut self) -> Result<I::Item, Stop> {
        SyncPull::pull(&*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::limit_safe;
    use crate::sources::{from_sequence, from_sequence_safe, sequence_safe};

    #[test]
    fn test_chain_in_order() {
        let mut chained = chain([
            from_sequence(vec![1, 2]),
            from_sequence(vec![]),
            from_sequence(vec![3]),
        ]);

        assert_eq!(chained.pull(), Ok(1));
        assert_eq!(chained.pull(), Ok(2));
        assert_eq!(chained.pull(), Ok(3));
        assert_eq!(chained.pull(), Err(Stop::Exhausted));
    }

    #[test]
    fn test_chain_safe_in_order() {
        let chained = chain_safe([
            from_sequence_safe(vec!["a"]),
            from_sequence_safe(vec!["b", "c"]),
        ]);

        assert_eq!(chained.pull(), Ok("a"));
        assert_eq!(chained.pull(), Ok("b"));
        assert_eq!(chained.pull(), Ok("c"));
        assert_eq!(chained.pull(), Err(Stop::Exhausted));
    }

    #[test]
    fn test_chain_safe_of_limits() {
        let chained = chain_safe([
            limit_safe(sequence_safe(0, 1), 2),
            limit_safe(sequence_safe(100, 1), 1),
        ]);

        assert_eq!(chained.pull(), Ok(0));
        assert_eq!(chained.pull(), Ok(1));
        assert_eq!(chained.pull(), Ok(100));
        assert_eq!(chained.pull(), Err(Stop::Exhausted));
    }

    #[test]
    fn test_empty_chain() {
        let chained = chain_safe(Vec::<crate::sources::SequenceSafe>::new());

        assert_eq!(chained.pull(), Err(Stop::Exhausted));
    }
}
