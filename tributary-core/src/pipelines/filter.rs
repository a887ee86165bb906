use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

/// Stage keeping the elements accepted by a predicate.
///
/// The stage holds no state of its own, so it is concurrent-safe whenever its
/// upstream is: each upstream pull is already an atomic unit of work. Build it
/// with [`filter_safe`] to get the concurrent-safe flavour from a closure
/// written inline.
///
#[derive(Clone)]
pub struct Filter<I, P> {
    upstream: I,
    predicate: P,
}

pub fn filter<I, P>(upstream: I, predicate: P) -> Filter<I, P>
where
    I: Pull,
    P: FnMut(&I::Item) -> bool,
{
    Filter {
        upstream,
        predicate,
    }
}

/// Like [`filter`], but takes an `Fn + Sync` predicate so the stage is a
/// [`SyncPull`] over a [`SyncPull`] upstream.
///
pub fn filter_safe<I, P>(upstream: I, predicate: P) -> Filter<I, P>
where
    I: SyncPull,
    P: Fn(&I::Item) -> bool + Send + Sync,
{
    Filter {
        upstream,
        predicate,
    }
}

impl<I, P> Pull for Filter<I, P>
where
    I: Pull,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn pull(&mut self) -> Result<I::Item, Stop> {
        loop {
            let value = self.upstream.pull()?;
            if (self.predicate)(&value) {
                return Ok(value);
            }
        }
    }
}

impl<I, P> SyncPull for Filter<I, P>
where
    I: SyncPull,
    P: Fn(&I::Item) -> bool + Send + Sync,
{
    type Item = I::Item;

    fn pull(&self) -> Result<I::Item, Stop> {
        loop {
            let value = self.upstream.pull()?;
            if (self.predicate)(&value) {
                return Ok(value);
            }
        }
    }
}
