use crate::pull::{Pull, SyncPull};
use crate::stop::{Stop, StopLatch};

/// Stage transforming each element with a mapping function.
///
/// The mapping returns `Result<U, Stop>`; returning a stop ends the stage.
/// `Stop::Exhausted` ends it as cleanly as running out of elements, so
/// finalizers report success with the elements mapped so far. The first stop
/// returned by the mapping is latched and reported by every later pull.
///
/// Upstream stops are forwarded unchanged. As with [`Filter`], the stage is
/// concurrent-safe whenever its upstream is; [`map_safe`] builds that flavour
/// from a closure written inline.
///
/// [`Filter`]: crate::pipelines::Filter
///
pub struct Map<I, F> {
    upstream: I,
    mapping: F,
    latch: StopLatch,
}

pub fn map<I, U, F>(upstream: I, mapping: F) -> Map<I, F>
where
    I: Pull,
    F: FnMut(I::Item) -> Result<U, Stop>,
{
    Map {
        upstream,
        mapping,
        latch: StopLatch::new(),
    }
}

/// Like [`map`], but takes an `Fn + Sync` mapping so the stage is a
/// [`SyncPull`] over a [`SyncPull`] upstream.
///
pub fn map_safe<I, U, F>(upstream: I, mapping: F) -> Map<I, F>
where
    I: SyncPull,
    F: Fn(I::Item) -> Result<U, Stop> + Send + Sync,
{
    Map {
        upstream,
        mapping,
        latch: StopLatch::new(),
    }
}

impl<I, U, F> Pull for Map<I, F>
where
    I: Pull,
    F: FnMut(I::Item) -> Result<U, Stop>,
{
    type Item = U;

    fn pull(&mut self) -> Result<U, Stop> {
        self.latch.check()?;

        let value = self.upstream.pull()?;
        (self.mapping)(value).map_err(|stop| self.latch.trip(stop))
    }
}

impl<I, U, F> SyncPull for Map<I, F>
where
    I: SyncPull,
    F: Fn(I::Item) -> Result<U, Stop> + Send + Sync,
{
    type Item = U;

    fn pull(&self) -> Result<U, Stop> {
        self.latch.check()?;

        let value = self.upstream.pull()?;
        (self.mapping)(value).map_err(|stop| self.latch.trip(stop))
    }
}
