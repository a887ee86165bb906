use parking_lot::Mutex;

use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

/// Stage zipping two iterators into `(left, right)` tuples.
///
/// Each round pulls the left side, then the right side. The first side to
/// stop ends the stage with its own stop; a left element already pulled in
/// that round is dropped.
///
pub struct Pair<L, R> {
    left: L,
    right: R,
    stopped: Option<Stop>,
}

pub fn pair<L: Pull, R: Pull>(left: L, right: R) -> Pair<L, R> {
    Pair {
        left,
        right,
        stopped: None,
    }
}

impl<L: Pull, R: Pull> Pair<L, R> {
    fn round(&mut self) -> Result<(L::Item, R::Item), Stop> {
        let left = self.left.pull()?;
        let right = self.right.pull()?;
        Ok((left, right))
    }
}

impl<L: Pull, R: Pull> Pull for Pair<L, R> {
    type Item = (L::Item, R::Item);

    fn pull(&mut self) -> Result<Self::Item, Stop> {
        if let Some(stop) = &self.stopped {
            return Err(stop.clone());
        }

        self.round().inspect_err(|stop| self.stopped = Some(stop.clone()))
    }
}

/// Concurrent-safe [`Pair`].
///
/// The whole round runs under one lock, so two threads never interleave their
/// left and right pulls and every tuple holds the elements of the same round.
/// The lock owns both upstreams, which therefore only need to be `Send`.
///
pub struct PairSafe<L, R> {
    round: Mutex<Pair<L, R>>,
}

pub fn pair_safe<L, R>(left: L, right: R) -> PairSafe<L, R>
where
    L: Pull + Send,
    R: Pull + Send,
{
    PairSafe {
        round: Mutex::new(pair(left, right)),
    }
}

impl<L, R> SyncPull for PairSafe<L, R>
where
    L: Pull + Send,
    R: Pull + Send,
{
    type Item = (L::Item, R::Item);

    fn pull(&self) -> Result<Self::Item, Stop> {
        self.round.lock().pull()
    }
}

impl<L, R> Pull for PairSafe<L, R>
where
    L: Pull + Send,
    R: Pull + Send,
{
    type Item = (L::Item, R::Item);

    #[inline]
    fn pull(&mut self) -> Result<Self::Item, Stop> {
        self.round.get_mut().pull()
    }
}
