/// Crate-wide result type for REST operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed REST errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No platform user exists for the given login name.
    #[error("unknown user: {login}")]
    UnknownUser { login: String },

    /// The API answered with a non-success status. The body is kept so the
    /// dispatch log can show the structured payload.
    #[error("api request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// The refresh-token grant was rejected.
    #[error("token refresh failed ({status}): {body}")]
    TokenRefresh { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("unexpected api response: {message}")]
    UnexpectedResponse { message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn unknown_user(login: impl Into<String>) -> Self {
        Self::UnknownUser {
            login: login.into(),
        }
    }

    #[must_use]
    pub fn unexpected(message: impl std::fmt::Display) -> Self {
        Self::UnexpectedResponse {
            message: message.to_string(),
        }
    }
}
