pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A template category has no entries for this identity. This is a
    /// configuration problem, not normal control flow.
    #[error("no \"{category}\" template for identity \"{identity}\"")]
    MissingTemplate { identity: String, category: String },
}

impl Error {
    #[must_use]
    pub fn missing(identity: impl Into<String>, category: impl Into<String>) -> Self {
        Self::MissingTemplate {
            identity: identity.into(),
            category: category.into(),
        }
    }
}
