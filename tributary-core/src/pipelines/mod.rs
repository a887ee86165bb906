//! Stages wrapping one or more upstream iterators.
//!
//! A stage is concurrent-safe only when everything it wraps is. Stages that
//! keep no state of their own ([`Filter`], [`Map`]) have one type for both
//! cases; the others come in a sequential and a `*Safe` flavour:
//!
//! | stage | sequential | concurrent-safe |
//! |-------|------------|-----------------|
//! | keep matching elements | [`filter`] | [`filter_safe`], same type |
//! | transform elements | [`map`] | [`map_safe`], same type |
//! | first `n` elements | [`limit`] | [`limit_safe`] |
//! | zip two iterators | [`pair`] | [`pair_safe`] |
//! | zip N iterators | [`combine`] | [`combine_safe`] |
//! | concatenate iterators | [`chain`] | [`chain_safe`] |

pub mod chain;
pub mod combine;
pub mod filter;
pub mod limit;
pub mod map;
pub mod pair;

pub use chain::{Chain, ChainSafe, chain, chain_safe};
pub use combine::{Combine, CombineSafe, combine, combine_safe};
pub use filter::{Filter, filter, filter_safe};
pub use limit::{Limit, LimitSafe, limit, limit_safe};
pub use map::{Map, map, map_safe};
pub use pair::{Pair, PairSafe, pair, pair_safe};
