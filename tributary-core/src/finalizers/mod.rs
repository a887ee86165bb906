//! Consumers that drive an iterator to its end.
//!
//! [`reduce`], [`collect`] and [`count`] run on the calling thread and turn
//! `Stop::Exhausted` into success. [`to_channel`] hands the iterator to a
//! producer thread and returns the receiving end of a channel. [`Final`] is a
//! cursor for loops that need to inspect the stop afterwards.

pub mod channel_sink;
pub mod final_iter;
pub mod reduce;

pub use channel_sink::{ChannelOptions, to_channel, to_channel_with};
pub use final_iter::{Final, into_final};
pub use reduce::{collect, count, reduce};
