use {moneta_common::CallerRoles, serde::Serialize};

/// Inbound events emitted by a chat transport.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A chat message in a joined channel.
    Message {
        channel: String,
        /// Sender's display name.
        sender: String,
        roles: CallerRoles,
        text: String,
        /// True when the message was sent by this identity itself.
        is_self: bool,
    },
    /// Another channel raided one of our channels.
    Raid {
        channel: String,
        raider: String,
        viewers: u64,
    },
}
