//! Cooperative cancellation for the channel bridges.
//!
//! A [`CancellationToken`] is a cloneable handle; all clones observe the same
//! state. Cancelling is idempotent and cannot be undone.
//!
//! The token is built on a crossbeam channel that never carries a message: the
//! only sender is dropped on cancel, which disconnects the receiver and wakes
//! every thread blocked on it. Because of that, blocking operations can race
//! cancellation inside a `crossbeam::select!`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use tracing::trace;

/// Message type of the signal channel. It has no values, so the channel can
/// only ever report disconnection.
///
#[derive(Debug)]
pub(crate) enum Never {}

#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<TokenState>,
}

struct TokenState {
    cancelled: AtomicBool,
    trigger: Mutex<Option<Sender<Never>>>,
    signal: Receiver<Never>,
    children: Mutex<Vec<Weak<TokenState>>>,
}

impl TokenState {
    fn new() -> Self {
        let (trigger, signal) = channel::bounded(0);

        TokenState {
            cancelled: AtomicBool::new(false),
            trigger: Mutex::new(Some(trigger)),
            signal,
            children: Mutex::new(Vec::new()),
        }
    }

    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }

        trace!("cancellation requested");

        // Dropping the only sender disconnects `signal` for every waiter.
        //
        drop(self.trigger.lock().take());

        let children = std::mem::take(&mut *self.children.lock());
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel();
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken {
            inner: Arc::new(TokenState::new()),
        }
    }

    /// Cancels the token and every child token derived from it.
    ///
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Blocks until the token is cancelled.
    ///
    pub fn wait(&self) {
        match self.inner.signal.recv() {
            Ok(never) => match never {},
            Err(_) => {}
        }
    }

    /// Blocks until the token is cancelled or `timeout` elapses.
    ///
    /// Returns true if the token was cancelled.
    ///
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.inner.signal.recv_timeout(timeout) {
            Ok(never) => match never {},
            Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => self.is_cancelled(),
        }
    }

    /// Creates a token that is cancelled together with this one, and can also
    /// be cancelled on its own without affecting this one.
    ///
    pub fn child_token(&self) -> CancellationToken {
        let child = CancellationToken::new();

        let mut children = self.inner.children.lock();
        if self.is_cancelled() {
            drop(children);
            child.cancel();
        } else {
            children.retain(|registered| registered.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }

        child
    }

    /// Receiver that disconnects once the token is cancelled.
    ///
    #[inline]
    pub(crate) fn signal(&self) -> &Receiver<Never> {
        &self.inner.signal
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
