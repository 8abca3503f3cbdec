use serde::{Deserialize, Serialize};

/// Role flags carried by an inbound chat message.
///
/// Derived from the platform's badge tags by the transport layer and treated
/// as read-only for the lifetime of one command invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallerRoles {
    pub broadcaster: bool,
    pub moderator: bool,
    pub vip: bool,
    pub subscriber: bool,
}

impl CallerRoles {
    /// Roles with every flag cleared (a plain viewer).
    #[must_use]
    pub fn viewer() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn broadcaster() -> Self {
        Self {
            broadcaster: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn moderator() -> Self {
        Self {
            moderator: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn vip() -> Self {
        Self {
            vip: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn subscriber() -> Self {
        Self {
            subscriber: true,
            ..Self::default()
        }
    }
}

/// Strip the `#` channel-name prefix to get the owner's login name.
///
/// Channel identifiers arrive as `#somechannel` on the chat side while the
/// REST side wants the bare login.
#[must_use]
pub fn channel_login(channel: &str) -> &str {
    channel.strip_prefix('#').unwrap_or(channel)
}
