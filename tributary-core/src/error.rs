use std::io;

use crate::stop::Failure;

/// Errors reported by the library's own operations.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An iterator ended with a failure.
    #[error(transparent)]
    Pipeline(#[from] Failure),

    #[error("failed to spawn producer thread `{name}`: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
