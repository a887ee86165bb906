//! The iterator abstraction.
//!
//! An iterator is anything that can be pulled for its next element. There are
//! two capability variants:
//!
//! - [`Pull`] - sequential. Pulling needs `&mut self`, so only one thread can
//!   drive the iterator at a time and its state is plain memory.
//! - [`SyncPull`] - concurrent-safe. Pulling needs only `&self`; any number of
//!   threads may pull at once and every element is delivered to exactly one of
//!   them.
//!
//! # Composability
//!
//! ```text
//! SyncPull source ──> SyncPull stage ──> SyncPull stage ──> shared by N threads
//!     Pull source ──> SyncPull-able stage              ──> Pull only
//! ```
//!
//! A stage implements [`SyncPull`] only when every upstream it wraps does. A
//! stage placed over a sequential upstream stays sequential, whatever its
//! name. Callers pick the variant that matches their threading; nothing is
//! checked at run time.
//!
//! Every concurrent-safe iterator in this crate also implements [`Pull`], so
//! it can be fed into sequential stages and finalizers. References and `Arc`s
//! to a [`SyncPull`] are iterators too, which is how several threads share one.
//!
//! Method chaining comes in two flavours: [`PullExt`] for any iterator, and
//! [`SyncPullExt`] whose `*_safe` methods keep the pipeline concurrent-safe.

use std::sync::Arc;

use crate::cancellation::CancellationToken;
use crate::finalizers::{self, Final};
use crate::pipelines::{self, Chain, ChainSafe, Filter, Limit, LimitSafe, Map, Pair, PairSafe};
use crate::stop::{Failure, Stop};

/// Sequential iterator.
///
pub trait Pull {
    type Item;

    /// Returns the next element or the signal that stopped the iterator.
    ///
    /// After the first `Err` every later call returns an equal `Err`.
    ///
    fn pull(&mut self) -> Result<Self::Item, Stop>;
}

/// Concurrent-safe iterator.
///
/// # Contract
///
/// - Each element is returned by exactly one call, whichever thread makes it.
/// - For a bounded source the k-th successful pull, in global order, returns
///   the k-th element of the source.
/// - Once a pull stopped, every later pull on any thread stops the same way.
///
pub trait SyncPull: Send + Sync {
    type Item;

    fn pull(&self) -> Result<Self::Item, Stop>;
}

impl<P: Pull + ?Sized> Pull for &mut P {
    type Item = P::Item;

    #[inline]
    fn pull(&mut self) -> Result<P::Item, Stop> {
        Pull::pull(&mut **self)
    }
}

impl<P: Pull + ?Sized> Pull for Box<P> {
    type Item = P::Item;

    #[inline]
    fn pull(&mut self) -> Result<P::Item, Stop> {
        Pull::pull(&mut **self)
    }
}

impl<S: SyncPull + ?Sized> SyncPull for &S {
    type Item = S::Item;

    #[inline]
    fn pull(&self) -> Result<S::Item, Stop> {
        SyncPull::pull(&**self)
    }
}

impl<S: SyncPull + ?Sized> SyncPull for Arc<S> {
    type Item = S::Item;

    #[inline]
    fn pull(&self) -> Result<S::Item, Stop> {
        SyncPull::pull(&**self)
    }
}

impl<S: SyncPull + ?Sized> SyncPull for Box<S> {
    type Item = S::Item;

    #[inline]
    fn pull(&self) -> Result<S::Item, Stop> {
        SyncPull::pull(&**self)
    }
}

impl<S: SyncPull + ?Sized> Pull for &S {
    type Item = S::Item;

    #[inline]
    fn pull(&mut self) -> Result<S::Item, Stop> {
        SyncPull::pull(&**self)
    }
}

impl<S: SyncPull + ?Sized> Pull for Arc<S> {
    type Item = S::Item;

    #[inline]
    fn pull(&mut self) -> Result<S::Item, Stop> {
        SyncPull::pull(&**self)
    }
}

// ============================================================================
// PullExt - method chaining for stages and finalizers
// ============================================================================

/// Chaining helpers available on every iterator.
///
/// Each method is a thin wrapper around the free function of the same name in
/// [`pipelines`] or [`finalizers`].
///
pub trait PullExt: Pull + Sized {
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        pipelines::filter(self, predicate)
    }

    fn map<U, F>(self, mapping: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item) -> Result<U, Stop>,
    {
        pipelines::map(self, mapping)
    }

    fn limit(self, n: i64) -> Limit<Self> {
        pipelines::limit(self, n)
    }

    fn pair<R: Pull>(self, right: R) -> Pair<Self, R> {
        pipelines::pair(self, right)
    }

    fn pair_safe<R>(self, right: R) -> PairSafe<Self, R>
    where
        Self: Send,
        R: Pull + Send,
    {
        pipelines::pair_safe(self, right)
    }

    fn chain(self, next: Self) -> Chain<Self> {
        pipelines::chain([self, next])
    }

    fn reduce<K, F>(self, init: K, combine: F) -> Result<K, Failure>
    where
        F: FnMut(Self::Item, K) -> K,
    {
        finalizers::reduce(self, init, combine)
    }

    fn collect(self) -> Result<Vec<Self::Item>, Failure> {
        finalizers::collect(self)
    }

    fn count(self) -> Result<usize, Failure> {
        finalizers::count(self)
    }

    fn into_final(self) -> Final<Self> {
        finalizers::into_final(self)
    }

    fn into_channel(
        self,
        token: &CancellationToken,
    ) -> crate::Result<crossbeam::channel::Receiver<Self::Item>>
    where
        Self: Send + 'static,
        Self::Item: Send + 'static,
    {
        finalizers::to_channel(token, self)
    }
}

impl<P: Pull> PullExt for P {}

// ============================================================================
// SyncPullExt - method chaining for concurrent-safe pipelines
// ============================================================================

/// Chaining helpers that keep a pipeline concurrent-safe.
///
/// A closure written inline takes its kind from the bound of the function it
/// is passed to, so the [`PullExt`] helpers build stages whose closures are
/// only `FnMut`. These helpers ask for `Fn + Send + Sync` closures instead and
/// return stages that implement [`SyncPull`].
///
pub trait SyncPullExt: SyncPull + Sized {
    fn filter_safe<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync,
    {
        pipelines::filter_safe(self, predicate)
    }

    fn map_safe<U, F>(self, mapping: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> Result<U, Stop> + Send + Sync,
    {
        pipelines::map_safe(self, mapping)
    }

    fn limit_safe(self, n: i64) -> LimitSafe<Self> {
        pipelines::limit_safe(self, n)
    }

    fn chain_safe(self, next: Self) -> ChainSafe<Self> {
        pipelines::chain_safe([self, next])
    }
}

impl<S: SyncPull> SyncPullExt for S {}

// ============================================================================
// Tests
// ============================================================================
