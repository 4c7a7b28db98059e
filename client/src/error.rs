use ethers::providers::ProviderError;

#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    ProviderError(#[from] ProviderError),

    #[error("unexpected {method} response: {reason}")]
    UnexpectedResponse {
        method: &'static str,
        reason: String,
    },
}

impl Error {
    /// Shortcut for a payload that deserialized but cannot be used.
    pub fn unexpected(method: &'static str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            method,
            reason: reason.into(),
        }
    }
}

/// The client result type.
pub type Result<T> = std::result::Result<T, Error>;
