//! Numeric aggregate finalizers for `tributary-core` iterators.
//!
//! [`sum`] and [`prod`] keep the element type. [`average`] and [`median`]
//! compute in `f64` and report [`NumberError::EmptyIterator`] when there is
//! nothing to aggregate.

pub mod aggregate;
pub mod error;

pub use aggregate::{average, median, prod, sum};
pub use error::{NumberError, Result};
