use async_trait::async_trait;

use crate::error::Result;

/// Send messages into a chat channel.
///
/// The wire protocol is entirely the implementor's business; the rest of the
/// bot only ever sees this trait.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, channel: &str, text: &str) -> Result<()>;
}
