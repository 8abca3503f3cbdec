use std::error::Error as StdError;

/// Crate-wide result type for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed transport errors shared across chat traits.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection to the chat server is gone.
    #[error("chat transport disconnected")]
    Disconnected,

    /// The transport refused the outbound payload.
    #[error("invalid outbound message: {message}")]
    InvalidMessage { message: String },

    /// Wrapped source error from the underlying connection.
    #[error("chat transport failed: {context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn invalid_message(message: impl std::fmt::Display) -> Self {
        Self::InvalidMessage {
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
