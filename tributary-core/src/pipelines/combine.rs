use parking_lot::Mutex;

use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

/// Stage pulling one element from each of N same-typed iterators per round.
///
/// Yields a `Vec` with the elements in source order. Stops as soon as any
/// source stops, forwarding that stop; elements already pulled in the failing
/// round are dropped. Without sources the stage is exhausted immediately.
///
pub struct Combine<I> {
    sources: Vec<I>,
    stopped: Option<Stop>,
}

pub fn combine<I, S>(sources: S) -> Combine<I>
where
    I: Pull,
    S: IntoIterator<Item = I>,
{
    let sources: Vec<I> = sources.into_iter().collect();
    let stopped = sources.is_empty().then_some(Stop::Exhausted);

    Combine { sources, stopped }
}

impl<I: Pull> Combine<I> {
    fn round(&mut self) -> Result<Vec<I::Item>, Stop> {
        let mut group = Vec::with_capacity(self.sources.len());
        for source in &mut self.sources {
            group.push(source.pull()?);
        }
        Ok(group)
    }
}

impl<I: Pull> Pull for Combine<I> {
    type Item = Vec<I::Item>;

    fn pull(&mut self) -> Result<Vec<I::Item>, Stop> {
        if let Some(stop) = &self.stopped {
            return Err(stop.clone());
        }

        self.round().inspect_err(|stop| self.stopped = Some(stop.clone()))
    }
}

/// Concurrent-safe [`Combine`].
///
/// Like [`PairSafe`](crate::pipelines::PairSafe), a whole round runs under one
/// lock that owns the sources.
///
pub struct CombineSafe<I> {
    round: Mutex<Combine<I>>,
}

pub fn combine_safe<I, S>(sources: S) -> CombineSafe<I>
where
    I: Pull + Send,
    S: IntoIterator<Item = I>,
{
    CombineSafe {
        round: Mutex::new(combine(sources)),
    }
}

impl<I: Pull + Send> SyncPull for CombineSafe<I> {
    type Item = Vec<I::Item>;

    fn pull(&self) -> Result<Vec<I::Item>, Stop> {
        self.round.lock().pull()
    }
}

impl<I: Pull + Send> Pull for CombineSafe<I> {
    type Item = Vec<I::Item>;

    #[inline]
    fn pull(&mut self) -> Result<Vec<I::Item>, Stop> {
        self.round.get_mut().pull()
    }
}
