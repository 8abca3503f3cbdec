use std::{collections::HashMap, sync::Arc};

use {
    moneta_chat::{ChatEvent, gating},
    moneta_commands::{Dispatcher, say_random},
    moneta_common::CallerRoles,
    tracing::{debug, error, warn},
};

/// Per-identity entry point for inbound chat events.
///
/// Every identity listens on the same channels; prefix gating decides which
/// one of them treats a given message as a command, so a channel never gets
/// the same answer twice.
pub struct Listener {
    dispatcher: Arc<Dispatcher>,
}

impl Listener {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Route one inbound event for `identity`.
    pub async fn on_event(&self, identity: &str, event: ChatEvent) {
        match event {
            ChatEvent::Message {
                channel,
                sender,
                roles,
                text,
                is_self,
            } => {
                self.on_inbound_message(identity, &channel, &sender, roles, &text, is_self)
                    .await;
            },
            ChatEvent::Raid {
                channel,
                raider,
                viewers,
            } => {
                self.on_raid(identity, &channel, &raider, viewers).await;
            },
        }
    }

    /// Gate and dispatch one chat message seen by `identity`.
    pub async fn on_inbound_message(
        &self,
        identity: &str,
        channel: &str,
        sender: &str,
        roles: CallerRoles,
        text: &str,
        is_self: bool,
    ) {
        if is_self {
            return;
        }

        let switchboard = self.dispatcher.switchboard();
        let Some(session) = switchboard.get(identity) else {
            warn!(identity, "event for unknown identity");
            return;
        };

        let is_active = switchboard.is_active(identity);
        let Some(command) = gating::command_text(text, identity, is_active) else {
            return;
        };

        debug!(identity, channel, sender, command, "dispatching command");
        self.dispatcher
            .dispatch(&session, channel, sender, roles, command)
            .await;
    }

    /// Greet a raid. Only the active identity answers, so a raid produces
    /// one greeting no matter how many identities saw the USERNOTICE.
    pub async fn on_raid(&self, identity: &str, channel: &str, raider: &str, viewers: u64) {
        let switchboard = self.dispatcher.switchboard();
        if !switchboard.is_active(identity) {
            return;
        }
        let Some(session) = switchboard.get(identity) else {
            return;
        };

        let mut extra = HashMap::new();
        extra.insert("viewers".to_string(), viewers.to_string());

        if let Err(err) = say_random(&session, channel, raider, "raid", &extra).await {
            error!(identity, raider, error = %err, "failed to greet raid");
        }
    }
}
