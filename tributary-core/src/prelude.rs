//! Everything needed to build and run a pipeline, for glob import.

pub use crate::cancellation::CancellationToken;
pub use crate::finalizers::{
    ChannelOptions, Final, collect, count, into_final, reduce, to_channel, to_channel_with,
};
pub use crate::pipelines::{
    chain, chain_safe, combine, combine_safe, filter, filter_safe, limit, limit_safe, map, map_safe,
    pair, pair_safe,
};
pub use crate::pull::{Pull, PullExt, SyncPull, SyncPullExt};
pub use crate::sources::{
    cycle, cycle_safe, empty, from_channel, from_sequence, from_sequence_safe, generate,
    generator, generator_safe, repeat, sequence, sequence_safe,
};
pub use crate::stop::{Failure, Stop};
