use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::utils::CachePadded;

use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

/// Infinite iterator repeating a list of values in order.
///
/// An empty list is exhausted from the first pull.
///
#[derive(Debug, Clone)]
pub struct Cycle<T> {
    values: Vec<T>,
    position: usize,
}

pub fn cycle<T: Clone>(values: Vec<T>) -> Cycle<T> {
    Cycle {
        values,
        position: 0,
    }
}

impl<T: Clone> Pull for Cycle<T> {
    type Item = T;

    fn pull(&mut self) -> Result<T, Stop> {
        let value = self.values.get(self.position).ok_or(Stop::Exhausted)?.clone();
        self.position = (self.position + 1) % self.values.len();
        Ok(value)
    }
}

/// Concurrent-safe [`Cycle`].
///
/// Every pull takes a ticket from an atomic counter and returns the value at
/// `ticket % len`. Over any number of pulls that is a multiple of the list
/// length each value is delivered equally often.
///
#[derive(Debug)]
pub struct CycleSafe<T> {
    values: Box<[T]>,
    ticket: CachePadded<AtomicUsize>,
}

pub fn cycle_safe<T: Clone>(values: Vec<T>) -> CycleSafe<T> {
    CycleSafe {
        values: values.into_boxed_slice(),
        ticket: CachePadded::new(AtomicUsize::new(0)),
    }
}

impl<T: Clone + Send + Sync> SyncPull for CycleSafe<T> {
    type Item = T;

    fn pull(&self) -> Result<T, Stop> {
        if self.values.is_empty() {
            return Err(Stop::Exhausted);
        }

        let ticket = self.ticket.fetch_add(1, Ordering::Relaxed);
        Ok(self.values[ticket % self.values.len()].clone())
    }
}

impl<T: Clone + Send + Sync> Pull for CycleSafe<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Result<T, Stop> {
        SyncPull::pull(&*self)
    }
}
