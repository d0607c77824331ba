use thiserror::Error;

/// Canonical result for seqchain.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by a caller-supplied fallible function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The node lacks the capability (restart, count, fork) the call needs.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    // Carried unchanged so callers can downcast back to their own type.
    #[error("Callback failed: {0}")]
    Callback(#[source] BoxError),

    #[error("Digest error: {0}")]
    Digest(String),
}

impl Error {
    pub fn unsupported(op: &str, node: &str) -> Self {
        Error::Unsupported(format!("{op} is not supported by {node}"))
    }

    pub fn callback<E>(e: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Callback(e.into())
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Digest(e.to_string())
    }
}
