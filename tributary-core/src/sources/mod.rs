//! Constructors that start a pipeline.
//!
//! | sequential | concurrent-safe | elements |
//! |------------|-----------------|----------|
//! | [`from_sequence`] | [`from_sequence_safe`] | a vector, in order |
//! | [`sequence`] | [`sequence_safe`] | wrapping `i64` progression |
//! | [`generator`] | [`generator_safe`], same type | producer function results |
//! | [`repeat`] | same type | one value forever |
//! | [`cycle`] | [`cycle_safe`] | a list of values forever |
//! | [`generate`] | - | each element derived from the previous one |
//! | [`empty`] | same type | nothing |
//! | [`from_channel`] | same type | values received from a channel |

pub mod channel_source;
pub mod constant;
pub mod cycle;
pub mod generator;
pub mod sequence;
pub mod slice_source;

pub use channel_source::{ChannelSource, from_channel};
pub use constant::{Empty, Repeat, empty, repeat};
pub use cycle::{Cycle, CycleSafe, cycle, cycle_safe};
pub use generator::{Generate, Generator, generate, generator, generator_safe};
pub use sequence::{Sequence, SequenceSafe, sequence, sequence_safe};
pub use slice_source::{SliceSource, SliceSourceSafe, from_sequence, from_sequence_safe};
