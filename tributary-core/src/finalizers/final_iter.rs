use std::iter::FusedIterator;

use crate::pull::Pull;
use crate::stop::{Failure, Stop};

/// Cursor-style adapter for driving an iterator from a loop.
///
/// ```
/// use tributary_core::prelude::*;
///
/// let mut cursor = from_sequence(vec![1, 2, 3]).into_final();
/// let mut total = 0;
/// while cursor.advance() {
///     total += cursor.current().copied().unwrap_or_default();
/// }
/// assert_eq!(total, 6);
/// assert!(cursor.err().is_none());
/// ```
///
/// `Final` is also a std [`Iterator`] that ends at the first stop, so it
/// works in a `for` loop; check [`Final::err`] afterwards to tell a failure
/// from a normal end.
///
pub struct Final<I: Pull> {
    iterator: I,
    current: Option<I::Item>,
    stop: Option<Stop>,
}

pub fn into_final<I: Pull>(iterator: I) -> Final<I> {
    Final {
        iterator,
        current: None,
        stop: None,
    }
}

impl<I: Pull> Final<I> {
    /// Pulls the next element. Returns false once the iterator stopped.
    ///
    pub fn advance(&mut self) -> bool {
        if self.stop.is_some() {
            return false;
        }

        match self.iterator.pull() {
            Ok(value) => {
                self.current = Some(value);
                true
            }
            Err(stop) => {
                self.current = None;
                self.stop = Some(stop);
                false
            }
        }
    }

    /// The element pulled by the last successful [`advance`](Final::advance).
    ///
    pub fn current(&self) -> Option<&I::Item> {
        self.current.as_ref()
    }

    /// The raw stop signal, once the iterator stopped.
    ///
    pub fn stop(&self) -> Option<&Stop> {
        self.stop.as_ref()
    }

    /// The failure that ended the iteration. `None` while running and after a
    /// normal end.
    ///
    pub fn err(&self) -> Option<&Failure> {
        self.stop.as_ref().and_then(Stop::failure)
    }

    pub fn into_inner(self) -> I {
        self.iterator
    }
}

impl<I: Pull> Iterator for Final<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.advance() {
            self.current.take()
        } else {
            None
        }
    }
}

impl<I: Pull> FusedIterator for Final<I> {}
