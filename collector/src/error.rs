/// A literal that is neither a base-10 nor a base-16 integer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("cannot interpret {literal:?} as an integer")]
pub struct ConversionError {
    /// The offending literal, verbatim.
    pub literal: String,
}

#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] client::Error),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("indexer page {page} failed: {source}")]
    Pagination {
        page: usize,
        source: client::Error,
    },
}

/// The collector result type.
pub type Result<T> = std::result::Result<T, Error>;
