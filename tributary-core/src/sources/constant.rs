use std::marker::PhantomData;

use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

/// Infinite iterator repeating one value.
///
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
}

pub fn repeat<T: Clone>(value: T) -> Repeat<T> {
    Repeat { value }
}

impl<T: Clone> Pull for Repeat<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Result<T, Stop> {
        Ok(self.value.clone())
    }
}

impl<T: Clone + Send + Sync> SyncPull for Repeat<T> {
    type Item = T;

    #[inline]
    fn pull(&self) -> Result<T, Stop> {
        Ok(self.value.clone())
    }
}

/// Iterator without elements.
///
pub struct Empty<T> {
    _phantom: PhantomData<fn() -> T>,
}

pub fn empty<T>() -> Empty<T> {
    Empty {
        _phantom: PhantomData,
    }
}

impl<T> Pull for Empty<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Result<T, Stop> {
        Err(Stop::Exhausted)
    }
}

impl<T> SyncPull for Empty<T> {
    type Item = T;

    #[inline]
    fn pull(&self) -> Result<T, Stop> {
        Err(Stop::Exhausted)
    }
}
