//! Reusable checks for [`Pull`](crate::Pull) and [`SyncPull`](crate::SyncPull)
//! implementations.
//!
//! The functions panic on the first violated property, so they can be called
//! directly from `#[test]` functions of this or any downstream crate.

pub mod concurrent_drivers;
