use std::sync::Arc;

use {
    moneta_api::{HelixClient, KanyeRest, TokenPair},
    moneta_commands::{
        CommandRegistry, CustomCommandMap, CustomCommandSink, CustomCommands, Dispatcher, FileSink,
        MemorySink,
    },
    moneta_config::{BotConfig, IdentityConfig, custom_commands_path, token_cache_path},
    moneta_irc::{IrcClient, IrcConfig},
    moneta_sessions::{IdentitySession, Switchboard},
    moneta_templates::TemplateSet,
    tokio::task::JoinSet,
    tracing::{info, warn},
};

use crate::listener::Listener;

/// Build every identity's session from config and pump chat events until
/// all connections shut down.
pub async fn run(config: BotConfig) -> anyhow::Result<()> {
    config.validate()?;

    let (seed, sink) = load_custom_commands().await;
    let registry = CommandRegistry::new(CustomCommands::new(seed, sink));

    let mut sessions = Vec::new();
    let mut receivers = Vec::new();
    for identity in &config.identities {
        let (session, events) = build_session(&config, identity).await;
        sessions.push(session);
        receivers.push((identity.name.clone(), events));
    }

    let switchboard = Arc::new(Switchboard::new(sessions));
    let dispatcher = Arc::new(Dispatcher::new(registry, switchboard, Arc::new(KanyeRest::new())));
    let listener = Arc::new(Listener::new(dispatcher));

    info!(identities = receivers.len(), "bot running");

    let mut tasks = JoinSet::new();
    for (name, mut events) in receivers {
        let listener = Arc::clone(&listener);
        tasks.spawn(async move {
            while let Some(event) = events.recv().await {
                listener.on_event(&name, event).await;
            }
            info!(identity = %name, "event stream ended");
        });
    }
    while tasks.join_next().await.is_some() {}
    Ok(())
}

/// One identity: REST client with its cached token pair, chat connection,
/// and template set.
async fn build_session(
    config: &BotConfig,
    identity: &IdentityConfig,
) -> (
    Arc<IdentitySession>,
    tokio::sync::mpsc::UnboundedReceiver<moneta_chat::ChatEvent>,
) {
    let cache_path = token_cache_path(&identity.name);
    let tokens = match &cache_path {
        // A previous run may have refreshed past the configured pair.
        Some(path) => match TokenPair::load(path).await {
            Ok(pair) => {
                info!(identity = %identity.name, "using cached token pair");
                pair
            },
            Err(_) => config_tokens(identity),
        },
        None => config_tokens(identity),
    };

    let api = HelixClient::new(
        &identity.name,
        &identity.client_id,
        &identity.client_secret,
        tokens.clone(),
        cache_path,
    );

    let (irc, events) = IrcClient::spawn(IrcConfig {
        nick: identity.name.clone(),
        token: tokens.access_token,
        channels: identity.channels.clone(),
    });

    let templates = TemplateSet::new(&identity.name, config.templates_for(&identity.name));

    let session = Arc::new(IdentitySession::new(
        &identity.name,
        Arc::new(irc),
        Arc::new(api),
        templates,
    ));
    (session, events)
}

fn config_tokens(identity: &IdentityConfig) -> TokenPair {
    TokenPair {
        access_token: identity.access_token.clone(),
        refresh_token: identity.refresh_token.clone(),
    }
}

/// Seed the custom-command store from its snapshot file when a data dir is
/// available; fall back to a memory-only store otherwise.
async fn load_custom_commands() -> (CustomCommandMap, Arc<dyn CustomCommandSink>) {
    let Some(path) = custom_commands_path() else {
        warn!("no data directory, custom commands will not survive restarts");
        return (CustomCommandMap::new(), Arc::new(MemorySink::new()));
    };

    let sink = FileSink::new(path);
    let seed = match sink.load().await {
        Ok(map) => map,
        Err(err) => {
            warn!(error = %err, "failed to load custom commands, starting empty");
            CustomCommandMap::new()
        },
    };
    (seed, Arc::new(sink))
}
