//! Pull-based lazy iterators whose pipelines can be driven from many threads.
//!
//! A pipeline starts at a source, goes through any number of stages and ends
//! in a finalizer:
//!
//! ```
//! use tributary_core::prelude::*;
//!
//! let total = sequence(1, 1)
//!     .filter(|value| value % 3 == 0)
//!     .limit(4)
//!     .reduce(0, |value, total| total + value)
//!     .unwrap();
//!
//! assert_eq!(total, 3 + 6 + 9 + 12);
//! ```
//!
//! Organization:
//!
//! - [`pull`] - the [`Pull`] and [`SyncPull`] traits and their chaining helpers.
//! - [`stop`] - the signals ending an iteration.
//! - [`sources`] - constructors: vectors, progressions, generators, channels.
//! - [`pipelines`] - filter, map, limit, pair, combine, chain.
//! - [`finalizers`] - reduce, collect, count, channel bridge, loop cursor.
//! - [`cancellation`] - the token stopping the channel bridges.
//! - [`common_tests`] - reusable test drivers for iterator implementations.
//!
//! Sharing one concurrent-safe pipeline between threads:
//!
//! ```
//! use std::thread;
//! use tributary_core::prelude::*;
//!
//! let squares = from_sequence_safe((0..1000).collect())
//!     .map_safe(|value: u64| Ok(value * value));
//!
//! let total: u64 = thread::scope(|scope| {
//!     let workers: Vec<_> = (0..4)
//!         .map(|_| scope.spawn(|| (&squares).reduce(0, |value, total| total + value)))
//!         .collect();
//!     workers.into_iter().map(|worker| worker.join().unwrap().unwrap()).sum()
//! });
//!
//! assert_eq!(total, (0..1000u64).map(|value| value * value).sum());
//! ```

pub mod cancellation;
pub mod common_tests;
pub mod error;
pub mod finalizers;
pub mod pipelines;
pub mod prelude;
pub mod pull;
pub mod sources;
pub mod stop;

pub use cancellation::CancellationToken;
pub use error::{Error, Result};
pub use pull::{Pull, PullExt, SyncPull, SyncPullExt};
pub use stop::{Failure, Stop, StopLatch};
