use std::collections::HashMap;

use crate::{access::AccessTier, custom::CustomCommands};

/// Closed set of built-in command implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Unpog,
    Freepog,
    Lurk,
    Shoutout,
    Coinflip,
    Kanye,
    Swap,
    SwapTo,
    AddCustom,
    CallCustom,
}

/// What the dispatcher needs to know about a resolved command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub kind: CommandKind,
    pub min_tier: AccessTier,
    /// Required tier when the invocation carries arguments. Only custom
    /// commands use this today (editing one inline needs a moderator).
    pub escalated_tier: Option<AccessTier>,
}

struct BuiltinSpec {
    name: &'static str,
    aliases: &'static [&'static str],
    tier: AccessTier,
    kind: CommandKind,
    escalated_tier: Option<AccessTier>,
}

const BUILTINS: &[BuiltinSpec] = &[
    BuiltinSpec {
        name: "unpog",
        aliases: &["banpog"],
        tier: AccessTier::Broadcaster,
        kind: CommandKind::Unpog,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "freepog",
        aliases: &["repog"],
        tier: AccessTier::Broadcaster,
        kind: CommandKind::Freepog,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "lurk",
        aliases: &[],
        tier: AccessTier::All,
        kind: CommandKind::Lurk,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "so",
        aliases: &["shoutout"],
        tier: AccessTier::Subs,
        kind: CommandKind::Shoutout,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "coinflip",
        aliases: &["flip", "coin"],
        tier: AccessTier::All,
        kind: CommandKind::Coinflip,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "kanye",
        aliases: &["ye", "yeezy"],
        tier: AccessTier::All,
        kind: CommandKind::Kanye,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "swap",
        aliases: &["switch"],
        tier: AccessTier::Subs,
        kind: CommandKind::Swap,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "swapto",
        aliases: &["set"],
        tier: AccessTier::Subs,
        kind: CommandKind::SwapTo,
        escalated_tier: None,
    },
    BuiltinSpec {
        name: "addcommand",
        aliases: &[],
        tier: AccessTier::Mods,
        kind: CommandKind::AddCustom,
        escalated_tier: None,
    },
];

/// Maps command words (canonical names and aliases alike) to entries, with
/// per-channel custom commands as the fallback.
///
/// The built-in table is fixed at startup; only the custom store mutates.
pub struct CommandRegistry {
    aliases: HashMap<&'static str, CommandEntry>,
    custom: CustomCommands,
}

impl CommandRegistry {
    #[must_use]
    pub fn new(custom: CustomCommands) -> Self {
        let mut aliases = HashMap::new();
        for spec in BUILTINS {
            let entry = CommandEntry {
                kind: spec.kind,
                min_tier: spec.tier,
                escalated_tier: spec.escalated_tier,
            };
            aliases.insert(spec.name, entry);
            for alias in spec.aliases {
                aliases.insert(*alias, entry);
            }
        }
        Self { aliases, custom }
    }

    /// Resolve a (case-folded) command word for a channel.
    ///
    /// Built-ins win over custom commands of the same name. A custom hit
    /// yields a synthetic entry open to everyone, escalated to moderators
    /// when arguments are present (inline edit path).
    #[must_use]
    pub fn lookup(&self, channel: &str, word: &str) -> Option<CommandEntry> {
        if let Some(entry) = self.aliases.get(word) {
            return Some(*entry);
        }
        self.custom.get(channel, word).map(|_| CommandEntry {
            kind: CommandKind::CallCustom,
            min_tier: AccessTier::All,
            escalated_tier: Some(AccessTier::Mods),
        })
    }

    #[must_use]
    pub fn custom(&self) -> &CustomCommands {
        &self.custom
    }
}
