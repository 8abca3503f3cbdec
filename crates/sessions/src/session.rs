use std::sync::Arc;

use {
    moneta_api::PlatformApi, moneta_chat::ChatTransport, moneta_templates::TemplateSet,
};

/// One configured bot identity: its chat transport, its REST client, and its
/// response templates.
///
/// Sessions are created at startup and live for the whole process; whether a
/// session is "active" is tracked by the [`crate::Switchboard`], not here.
pub struct IdentitySession {
    pub name: String,
    pub transport: Arc<dyn ChatTransport>,
    pub api: Arc<dyn PlatformApi>,
    pub templates: TemplateSet,
}

impl IdentitySession {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        transport: Arc<dyn ChatTransport>,
        api: Arc<dyn PlatformApi>,
        templates: TemplateSet,
    ) -> Self {
        Self {
            name: name.into(),
            transport,
            api,
            templates,
        }
    }

    /// Send a literal line of chat.
    pub async fn say(&self, channel: &str, text: &str) -> moneta_chat::Result<()> {
        self.transport.send_message(channel, text).await
    }
}
