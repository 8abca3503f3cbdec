/// Crate-wide result type for command handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside one command invocation.
///
/// All variants stop at the dispatch boundary; nothing here crosses into
/// other invocations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] moneta_chat::Error),

    #[error(transparent)]
    Api(#[from] moneta_api::Error),

    #[error(transparent)]
    Template(#[from] moneta_templates::Error),
}
