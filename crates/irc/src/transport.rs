use std::time::Duration;

use {
    async_trait::async_trait,
    futures::{SinkExt, StreamExt},
    moneta_chat::{ChatEvent, ChatTransport},
    tokio::sync::mpsc,
    tokio_tungstenite::{connect_async, tungstenite::Message},
    tracing::{debug, error, info, warn},
};

use crate::{
    error::{Error, Result},
    parse::{ParsedLine, parse_line},
};

/// Production chat endpoint.
pub const CHAT_WS_URL: &str = "wss://irc-ws.chat.twitch.tv:443";

/// Maximum reconnect backoff delay.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Connection settings for one identity.
#[derive(Debug, Clone)]
pub struct IrcConfig {
    /// Login name, also used to flag the identity's own messages.
    pub nick: String,
    /// OAuth access token, with or without the `oauth:` prefix.
    pub token: String,
    pub channels: Vec<String>,
}

/// Handle to one identity's chat connection.
///
/// The connection itself runs in a background task with reconnect and
/// exponential backoff; this handle only queues outbound lines.
pub struct IrcClient {
    write_tx: mpsc::UnboundedSender<String>,
}

impl IrcClient {
    /// Connect to the production endpoint. Returns immediately together
    /// with the receiver of inbound chat events.
    #[must_use]
    pub fn spawn(config: IrcConfig) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        Self::spawn_at(CHAT_WS_URL, config)
    }

    /// Connect to a custom endpoint (tests point this at a local server).
    #[must_use]
    pub fn spawn_at(url: &str, config: IrcConfig) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        tokio::spawn(connection_loop(url.to_string(), config, event_tx, write_rx));

        (Self { write_tx }, event_rx)
    }
}

#[async_trait]
impl ChatTransport for IrcClient {
    async fn send_message(&self, channel: &str, text: &str) -> moneta_chat::Result<()> {
        let channel = normalize_channel(channel);
        self.write_tx
            .send(format!("PRIVMSG {channel} :{text}"))
            .map_err(|_| moneta_chat::Error::Disconnected)
    }
}

fn normalize_channel(channel: &str) -> String {
    if channel.starts_with('#') {
        channel.to_string()
    } else {
        format!("#{channel}")
    }
}

/// Main connection loop with auto-reconnect.
async fn connection_loop(
    url: String,
    config: IrcConfig,
    event_tx: mpsc::UnboundedSender<ChatEvent>,
    mut write_rx: mpsc::UnboundedReceiver<String>,
) {
    let mut backoff = Duration::from_secs(1);

    loop {
        info!(url = %url, nick = %config.nick, "connecting to chat");

        match connect_and_run(&url, &config, &event_tx, &mut write_rx).await {
            // Ok means a deliberate local shutdown; anything else reconnects.
            Ok(()) => {
                debug!(nick = %config.nick, "connection shut down");
                return;
            },
            Err(e) => {
                error!(nick = %config.nick, error = %e, "connection error");
            },
        }

        info!(delay_ms = backoff.as_millis(), "reconnecting after delay");
        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

/// Single connection attempt: authenticate, join, then pump lines.
async fn connect_and_run(
    url: &str,
    config: &IrcConfig,
    event_tx: &mpsc::UnboundedSender<ChatEvent>,
    write_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<()> {
    let (ws_stream, _response) = connect_async(url).await?;
    let (mut ws_sink, mut ws_reader) = ws_stream.split();

    let token = config.token.strip_prefix("oauth:").unwrap_or(&config.token);
    ws_sink
        .send(Message::Text(
            "CAP REQ :twitch.tv/tags twitch.tv/commands".into(),
        ))
        .await?;
    ws_sink
        .send(Message::Text(format!("PASS oauth:{token}").into()))
        .await?;
    ws_sink
        .send(Message::Text(format!("NICK {}", config.nick).into()))
        .await?;
    for channel in &config.channels {
        ws_sink
            .send(Message::Text(
                format!("JOIN {}", normalize_channel(channel)).into(),
            ))
            .await?;
    }

    loop {
        tokio::select! {
            msg = ws_reader.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // One frame may carry several CRLF-separated lines.
                        for line in text.lines().filter(|l| !l.is_empty()) {
                            match parse_line(line, &config.nick) {
                                Some(ParsedLine::Ping { payload }) => {
                                    ws_sink
                                        .send(Message::Text(format!("PONG :{payload}").into()))
                                        .await?;
                                },
                                Some(ParsedLine::Event(event)) => {
                                    if event_tx.send(event).is_err() {
                                        warn!("event receiver dropped, closing connection");
                                        let _ = ws_sink.send(Message::Close(None)).await;
                                        return Ok(());
                                    }
                                },
                                None => {},
                            }
                        }
                    },
                    Some(Ok(Message::Ping(data))) => {
                        ws_sink.send(Message::Pong(data)).await?;
                    },
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("websocket closed by server");
                        return Err(Error::Closed);
                    },
                    Some(Ok(_)) => {},
                    Some(Err(e)) => return Err(Error::WebSocket(e)),
                }
            },
            line = write_rx.recv() => {
                match line {
                    Some(text) => {
                        ws_sink.send(Message::Text(text.into())).await?;
                    },
                    None => {
                        // All client handles dropped; shut down for good.
                        let _ = ws_sink.send(Message::Close(None)).await;
                        return Ok(());
                    },
                }
            },
        }
    }
}
