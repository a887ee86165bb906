//! Terminal signals of an iterator.
//!
//! Every pull either yields an element or a [`Stop`]. A stop is one of two
//! things:
//!
//! - [`Stop::Exhausted`] - the expected end of the sequence. Slices running out,
//!   closed channels, reached limits and cancelled tokens all end this way.
//! - [`Stop::Failed`] - a real failure carried as a [`Failure`].
//!
//! Finalizers turn `Exhausted` into a successful result and surface `Failed`
//! as an error. Stages forward stops unchanged.
//!
//! Once an iterator stopped it keeps returning the very same stop. Iterators
//! that produce stops of their own record the first one in a [`StopLatch`].

use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::trace;

// ============================================================================
// Failure
// ============================================================================

/// The cause of a failed iteration.
///
/// Wraps any error in an `Arc`, so the same cause can be handed to every
/// caller that pulls from a failed iterator. Two failures compare equal only
/// when they share the recorded cause.
///
#[derive(Clone)]
pub struct Failure(Arc<dyn StdError + Send + Sync + 'static>);

impl Failure {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Failure(Arc::new(error))
    }

    /// Creates a failure from a plain message.
    ///
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Failure::new(MessageError(message))
    }

    /// Returns the original error if it is of type `E`.
    ///
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        (*self.0).downcast_ref::<E>()
    }

    /// Returns true if both failures carry the same recorded cause.
    ///
    pub fn ptr_eq(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Failure").field(&self.0).finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Failure {}

struct MessageError<M>(M);

impl<M: fmt::Debug> fmt::Debug for MessageError<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<M: fmt::Display> fmt::Display for MessageError<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<M: fmt::Display + fmt::Debug> StdError for MessageError<M> {}

// ============================================================================
// Stop
// ============================================================================

/// Terminal signal returned by a pull.
///
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Stop {
    /// No more elements. Not an error.
    #[error("iterator exhausted")]
    Exhausted,

    /// The iteration failed.
    #[error(transparent)]
    Failed(Failure),
}

impl Stop {
    /// Wraps an error into a failed stop.
    ///
    pub fn failed<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Stop::Failed(Failure::new(error))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Stop::Exhausted)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Stop::Exhausted => None,
            Stop::Failed(failure) => Some(failure),
        }
    }

    /// Collapses the stop into the outcome of a finished iteration:
    /// `Exhausted` is a success, `Failed` carries its failure.
    ///
    pub fn into_result(self) -> Result<(), Failure> {
        match self {
            Stop::Exhausted => Ok(()),
            Stop::Failed(failure) => Err(failure),
        }
    }
}

impl From<Failure> for Stop {
    fn from(failure: Failure) -> Self {
        Stop::Failed(failure)
    }
}

// ============================================================================
// StopLatch
// ============================================================================

/// Set-once record of the first stop an iterator produced.
///
/// The latch can be shared between threads. Reads after the stop was recorded
/// are a single atomic load.
///
#[derive(Debug, Default)]
pub struct StopLatch {
    stop: OnceLock<Stop>,
}

impl StopLatch {
    pub const fn new() -> Self {
        StopLatch {
            stop: OnceLock::new(),
        }
    }

    /// Returns the recorded stop, if any.
    ///
    #[inline]
    pub fn check(&self) -> Result<(), Stop> {
        match self.stop.get() {
            Some(stop) => Err(stop.clone()),
            None => Ok(()),
        }
    }

    /// Records `stop` unless a stop was recorded already.
    ///
    /// Returns the recorded stop, which is the one every later pull reports.
    ///
    pub fn trip(&self, stop: Stop) -> Stop {
        let mut recorded_now = false;
        let recorded = self.stop.get_or_init(|| {
            recorded_now = true;
            stop
        });

        if recorded_now {
            trace!(stop = %recorded, "iterator latched");
        }

        recorded.clone()
    }

    pub fn is_tripped(&self) -> bool {
        self.stop.get().is_some()
    }

    pub fn get(&self) -> Option<&Stop> {
        self.stop.get()
    }
}

// ============================================================================
// Tests
// ============================================================================
