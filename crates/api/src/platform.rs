use async_trait::async_trait;

use crate::{
    error::Result,
    types::{BlockedTerm, StreamInfo},
};

/// The platform capabilities the bot core consumes.
///
/// Implemented by [`crate::HelixClient`] in production and by in-memory
/// doubles in tests.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Current stream of `login`, or `None` when the channel is offline.
    async fn fetch_current_stream(&self, login: &str) -> Result<Option<StreamInfo>>;

    /// Resolve a login name to the platform user id.
    async fn fetch_user_id(&self, login: &str) -> Result<String>;

    async fn add_blocked_term(
        &self,
        text: &str,
        channel_id: &str,
        moderator_id: &str,
    ) -> Result<()>;

    async fn list_blocked_terms(
        &self,
        channel_id: &str,
        moderator_id: &str,
    ) -> Result<Vec<BlockedTerm>>;

    /// Delete a blocked term by its id (delete-by-id only; resolving text to
    /// id is the caller's job via [`Self::list_blocked_terms`]).
    async fn remove_blocked_term(
        &self,
        id: &str,
        channel_id: &str,
        moderator_id: &str,
    ) -> Result<()>;
}
