use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Template categories for one identity: category name to candidate lines.
pub type TemplateMap = HashMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config declares no identities")]
    NoIdentities,
    #[error("duplicate identity name \"{name}\"")]
    DuplicateIdentity { name: String },
    #[error("identity \"{name}\" joins no channels")]
    NoChannels { name: String },
}

/// Root configuration.
///
/// Identity order matters: the first entry starts active and the swap
/// command walks the list in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub identities: Vec<IdentityConfig>,
    /// Response templates keyed by identity name.
    pub templates: HashMap<String, TemplateMap>,
}

/// One bot identity: platform credentials plus the channels it joins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub name: String,
    pub access_token: String,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    /// Channels to join, with or without the leading `#`.
    pub channels: Vec<String>,
}

impl BotConfig {
    /// Reject configs the runtime cannot start from.
    pub fn validate(&self) -> Result<(), Error> {
        if self.identities.is_empty() {
            return Err(Error::NoIdentities);
        }
        let mut seen = std::collections::HashSet::new();
        for identity in &self.identities {
            if !seen.insert(identity.name.as_str()) {
                return Err(Error::DuplicateIdentity {
                    name: identity.name.clone(),
                });
            }
            if identity.channels.is_empty() {
                return Err(Error::NoChannels {
                    name: identity.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Template categories for `identity`, empty when none are configured.
    #[must_use]
    pub fn templates_for(&self, identity: &str) -> TemplateMap {
        self.templates.get(identity).cloned().unwrap_or_default()
    }
}
