use std::sync::Arc;

use {
    moneta_api::QuoteSource,
    moneta_common::CallerRoles,
    moneta_sessions::{IdentitySession, Switchboard},
    tracing::{debug, error},
};

use crate::{
    access,
    error::Error,
    handlers,
    registry::{CommandKind, CommandRegistry},
};

/// One parsed command invocation, handed to handlers.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    /// The identity answering this message.
    pub session: &'a Arc<IdentitySession>,
    pub channel: &'a str,
    /// Caller's display name (template subject for most commands).
    pub caller: &'a str,
    pub roles: CallerRoles,
    /// Arguments after the command word, original casing preserved.
    pub args: &'a [String],
    /// The case-folded command word that resolved this invocation.
    pub word: &'a str,
}

/// Parses inbound command text, enforces access tiers, and runs handlers.
///
/// A handler failure is logged here and goes no further: one bad command
/// never takes down the dispatch loop or another identity's session.
pub struct Dispatcher {
    registry: CommandRegistry,
    switchboard: Arc<Switchboard>,
    quotes: Arc<dyn QuoteSource>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        registry: CommandRegistry,
        switchboard: Arc<Switchboard>,
        quotes: Arc<dyn QuoteSource>,
    ) -> Self {
        Self {
            registry,
            switchboard,
            quotes,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    #[must_use]
    pub fn switchboard(&self) -> &Arc<Switchboard> {
        &self.switchboard
    }

    #[must_use]
    pub fn quotes(&self) -> &dyn QuoteSource {
        self.quotes.as_ref()
    }

    /// Dispatch one message that already passed prefix gating.
    ///
    /// Unknown command words are a silent no-op.
    pub async fn dispatch(
        &self,
        session: &Arc<IdentitySession>,
        channel: &str,
        caller: &str,
        roles: CallerRoles,
        raw: &str,
    ) {
        let mut tokens = raw.split_whitespace();
        let Some(first) = tokens.next() else {
            return;
        };
        let word = first.to_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let Some(entry) = self.registry.lookup(channel, &word) else {
            debug!(identity = %session.name, word, "not a command, ignoring");
            return;
        };

        // Arguments escalate the requirement when the entry says so
        // (editing a custom command inline needs a moderator).
        let required = if args.is_empty() {
            entry.min_tier
        } else {
            entry.escalated_tier.unwrap_or(entry.min_tier)
        };

        if !access::satisfies(required, &roles) {
            debug!(identity = %session.name, word, ?required, "access denied");
            self.send_denied(session, channel).await;
            return;
        }

        let invocation = Invocation {
            session,
            channel,
            caller,
            roles,
            args: &args,
            word: &word,
        };

        if let Err(err) = self.run(entry.kind, &invocation).await {
            log_handler_error(&word, &err);
        }
    }

    async fn send_denied(&self, session: &Arc<IdentitySession>, channel: &str) {
        // The denied line goes out raw: no placeholder expansion.
        match session.templates.pick("denied") {
            Ok(text) => {
                if let Err(err) = session.say(channel, &text).await {
                    error!(identity = %session.name, error = %err, "failed to send denied message");
                }
            },
            Err(err) => error!(identity = %session.name, error = %err, "no denied template"),
        }
    }

    pub(crate) async fn run(
        &self,
        kind: CommandKind,
        invocation: &Invocation<'_>,
    ) -> crate::Result<()> {
        match kind {
            CommandKind::Unpog => handlers::pog::unpog(invocation).await,
            CommandKind::Freepog => handlers::pog::freepog(invocation).await,
            CommandKind::Lurk => handlers::misc::lurk(invocation).await,
            CommandKind::Shoutout => handlers::misc::shoutout(invocation).await,
            CommandKind::Coinflip => handlers::coinflip::coinflip(invocation).await,
            CommandKind::Kanye => handlers::misc::kanye(self, invocation).await,
            CommandKind::Swap => handlers::swap::swap(self, invocation).await,
            CommandKind::SwapTo => handlers::swap::swap_to(self, invocation).await,
            CommandKind::AddCustom => handlers::custom::add_custom(self, invocation).await,
            CommandKind::CallCustom => handlers::custom::call_custom(self, invocation).await,
        }
    }
}

/// Log a failed handler, keeping structured API payloads readable.
fn log_handler_error(word: &str, err: &Error) {
    match err {
        Error::Api(moneta_api::Error::Status { status, body }) => {
            error!(command = word, status, body = %body, "command failed with api error");
        },
        _ => error!(command = word, error = %err, "command failed"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use {
        async_trait::async_trait,
        moneta_api::{BlockedTerm, PlatformApi, StreamInfo},
        moneta_chat::ChatTransport,
        moneta_templates::TemplateSet,
    };

    use crate::{
        custom::{CustomCommandMap, CustomCommands, MemorySink},
        handlers::coinflip::{self, CoinSide},
    };

    use super::*;

    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }

        fn lines(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_message(&self, _channel: &str, text: &str) -> moneta_chat::Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubApi {
        listed: Vec<BlockedTerm>,
        added: Mutex<Vec<String>>,
        removed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PlatformApi for StubApi {
        async fn fetch_current_stream(
            &self,
            _login: &str,
        ) -> moneta_api::Result<Option<StreamInfo>> {
            Ok(Some(StreamInfo {
                game_name: "Tetris".to_string(),
            }))
        }

        async fn fetch_user_id(&self, login: &str) -> moneta_api::Result<String> {
            Ok(format!("id-{login}"))
        }

        async fn add_blocked_term(
            &self,
            text: &str,
            _channel_id: &str,
            _moderator_id: &str,
        ) -> moneta_api::Result<()> {
            self.added.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn list_blocked_terms(
            &self,
            _channel_id: &str,
            _moderator_id: &str,
        ) -> moneta_api::Result<Vec<BlockedTerm>> {
            Ok(self.listed.clone())
        }

        async fn remove_blocked_term(
            &self,
            id: &str,
            _channel_id: &str,
            _moderator_id: &str,
        ) -> moneta_api::Result<()> {
            self.removed.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    struct StubQuotes;

    #[async_trait]
    impl QuoteSource for StubQuotes {
        async fn fetch_quote(&self) -> moneta_api::Result<String> {
            Ok("I make awesome stuff".to_string())
        }
    }

    fn templates(identity: &str) -> TemplateSet {
        let mut cats: HashMap<String, Vec<String>> = HashMap::new();
        for (category, line) in [
            ("denied", "no."),
            ("swap", "now active"),
            ("swapFail", "who?"),
            ("flipWin", "you win"),
            ("flipLose", "you lose"),
            ("lurk", "lurk well"),
            ("customCommand", "command saved"),
            ("kanye", "Ye says {quote}"),
            ("shoutout", "go follow {displayName}, last seen playing {gameName}"),
        ] {
            cats.insert(category.to_string(), vec![line.to_string()]);
        }
        TemplateSet::new(identity, cats)
    }

    fn fixture_with_api(
        names: &[&str],
        api: Arc<StubApi>,
    ) -> (Dispatcher, Vec<Arc<RecordingTransport>>) {
        let mut transports = Vec::new();
        let mut sessions = Vec::new();
        for name in names {
            let transport = Arc::new(RecordingTransport::new());
            transports.push(Arc::clone(&transport));
            sessions.push(Arc::new(IdentitySession::new(
                *name,
                transport,
                Arc::clone(&api) as Arc<dyn PlatformApi>,
                templates(name),
            )));
        }
        let registry = CommandRegistry::new(CustomCommands::new(
            CustomCommandMap::new(),
            Arc::new(MemorySink::new()),
        ));
        let dispatcher = Dispatcher::new(
            registry,
            Arc::new(Switchboard::new(sessions)),
            Arc::new(StubQuotes),
        );
        (dispatcher, transports)
    }

    fn fixture(names: &[&str]) -> (Dispatcher, Vec<Arc<RecordingTransport>>) {
        fixture_with_api(names, Arc::new(StubApi::default()))
    }

    async fn run(dispatcher: &Dispatcher, roles: CallerRoles, raw: &str) {
        let session = dispatcher.switchboard().active();
        dispatcher
            .dispatch(&session, "#chan", "someviewer", roles, raw)
            .await;
    }

    #[tokio::test]
    async fn unknown_word_is_a_silent_no_op() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::broadcaster(), "notacommand at all").await;
        assert!(transports[0].lines().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn viewer_is_denied_a_sub_command() {
        let (dispatcher, transports) = fixture(&["a", "b"]);
        run(&dispatcher, CallerRoles::viewer(), "swap").await;

        assert_eq!(transports[0].lines(), ["no."]);
        assert!(transports[1].lines().is_empty());
        assert!(dispatcher.switchboard().is_active("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn swap_advances_and_answers_from_the_new_identity() {
        let (dispatcher, transports) = fixture(&["a", "b"]);
        run(&dispatcher, CallerRoles::subscriber(), "swap").await;

        assert!(dispatcher.switchboard().is_active("b"));
        assert!(transports[0].lines().is_empty());
        assert_eq!(transports[1].lines(), ["now active"]);
    }

    #[tokio::test(start_paused = true)]
    async fn swap_alias_and_casing_resolve() {
        let (dispatcher, _transports) = fixture(&["a", "b"]);
        run(&dispatcher, CallerRoles::moderator(), "SWITCH").await;
        assert!(dispatcher.switchboard().is_active("b"));
    }

    #[tokio::test(start_paused = true)]
    async fn swapto_selects_by_name() {
        let (dispatcher, transports) = fixture(&["a", "b", "c"]);
        run(&dispatcher, CallerRoles::subscriber(), "swapto c").await;

        assert!(dispatcher.switchboard().is_active("c"));
        assert_eq!(transports[2].lines(), ["now active"]);
    }

    #[tokio::test(start_paused = true)]
    async fn swapto_unknown_identity_fails_in_place() {
        let (dispatcher, transports) = fixture(&["a", "b"]);
        run(&dispatcher, CallerRoles::subscriber(), "swapto nobody").await;

        assert!(dispatcher.switchboard().is_active("a"));
        assert_eq!(transports[0].lines(), ["who?"]);
        assert!(transports[1].lines().is_empty());
    }

    #[tokio::test]
    async fn coinflip_without_a_call_explains_usage() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::viewer(), "coinflip sideways").await;
        assert_eq!(
            transports[0].lines(),
            ["You have to call either heads or tails."]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn coinflip_runs_the_full_sequence() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::viewer(), "coinflip heads").await;

        let lines = transports[0].lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Time to flip a coin. Here goes...");
        assert!(lines[1] == "It is... Heads!" || lines[1] == "It is... Tails!");
        assert!(lines[2] == "you win" || lines[2] == "you lose");
        // The announcement and the verdict agree.
        assert_eq!(lines[1] == "It is... Heads!", lines[2] == "you win");
    }

    #[tokio::test(start_paused = true)]
    async fn coinflip_win_and_lose_lines() {
        let (dispatcher, transports) = fixture(&["a"]);
        let session = dispatcher.switchboard().active();
        let args: Vec<String> = Vec::new();
        let invocation = Invocation {
            session: &session,
            channel: "#chan",
            caller: "someviewer",
            roles: CallerRoles::viewer(),
            args: &args,
            word: "coinflip",
        };

        coinflip::announce(&invocation, CoinSide::Heads, CoinSide::Heads)
            .await
            .unwrap();
        coinflip::announce(&invocation, CoinSide::Tails, CoinSide::Heads)
            .await
            .unwrap();

        assert_eq!(
            transports[0].lines(),
            [
                "It is... Heads!",
                "you win",
                "It is... Tails!",
                "you lose",
            ]
        );
    }

    #[tokio::test]
    async fn addcommand_stores_and_custom_word_replays_verbatim() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::moderator(), "addcommand greet hello there friend").await;
        assert_eq!(transports[0].lines(), ["command saved"]);

        run(&dispatcher, CallerRoles::viewer(), "greet").await;
        assert_eq!(transports[0].lines(), ["command saved", "hello there friend"]);
    }

    #[tokio::test]
    async fn custom_inline_edit_needs_a_moderator() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::moderator(), "addcommand greet hello").await;

        run(&dispatcher, CallerRoles::viewer(), "greet changed text").await;
        assert_eq!(transports[0].lines(), ["command saved", "no."]);

        run(&dispatcher, CallerRoles::moderator(), "greet changed text").await;
        run(&dispatcher, CallerRoles::viewer(), "greet").await;
        assert_eq!(
            transports[0].lines().last().map(String::as_str),
            Some("changed text")
        );
    }

    #[tokio::test]
    async fn addcommand_is_gated_to_moderators() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::vip(), "addcommand greet hi").await;
        assert_eq!(transports[0].lines(), ["no."]);
    }

    #[tokio::test]
    async fn unpog_blocks_every_pog_term() {
        let api = Arc::new(StubApi::default());
        let (dispatcher, transports) = fixture_with_api(&["a"], Arc::clone(&api));
        run(&dispatcher, CallerRoles::broadcaster(), "unpog").await;

        assert_eq!(transports[0].lines(), ["/me unpogs your champ"]);
        assert_eq!(
            *api.added.lock().unwrap(),
            ["pogchamp", "poggers", "pog"]
        );
    }

    #[tokio::test]
    async fn freepog_removes_only_terms_currently_blocked() {
        let api = Arc::new(StubApi {
            listed: vec![
                BlockedTerm {
                    id: "42".to_string(),
                    text: "pog".to_string(),
                },
                BlockedTerm {
                    id: "7".to_string(),
                    text: "unrelated".to_string(),
                },
            ],
            ..StubApi::default()
        });
        let (dispatcher, transports) = fixture_with_api(&["a"], Arc::clone(&api));
        run(&dispatcher, CallerRoles::broadcaster(), "freepog").await;

        assert_eq!(transports[0].lines(), ["/me pogs your champ PogChamp"]);
        assert_eq!(*api.removed.lock().unwrap(), ["42"]);
    }

    #[tokio::test]
    async fn pog_commands_are_broadcaster_only() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::moderator(), "unpog").await;
        assert_eq!(transports[0].lines(), ["no."]);
    }

    #[tokio::test]
    async fn kanye_expands_the_fetched_quote() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::viewer(), "ye").await;
        assert_eq!(transports[0].lines(), ["Ye says I make awesome stuff"]);
    }

    #[tokio::test]
    async fn shoutout_expands_live_data_for_the_target() {
        let (dispatcher, transports) = fixture(&["a"]);
        run(&dispatcher, CallerRoles::subscriber(), "so somestreamer").await;
        assert_eq!(
            transports[0].lines(),
            ["go follow somestreamer, last seen playing Tetris"]
        );
    }
}
