use tributary_core::Failure;

#[derive(Debug, thiserror::Error)]
pub enum NumberError {
    /// The aggregate has no value for an empty input.
    #[error("empty iterator")]
    EmptyIterator,

    /// An element has no `f64` representation.
    #[error("element cannot be represented as f64")]
    NotRepresentable,

    #[error(transparent)]
    Pipeline(#[from] Failure),
}

pub type Result<T> = std::result::Result<T, NumberError>;
