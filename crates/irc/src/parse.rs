//! Pure parsing of tagged IRC lines into chat events.
//!
//! Only the message shapes the bot reacts to are modeled; everything else
//! parses to `None` and is dropped by the connection loop.

use std::collections::HashMap;

use {moneta_chat::ChatEvent, moneta_common::CallerRoles};

/// One line, split into the pieces the event mapping needs.
#[derive(Debug)]
struct RawLine<'a> {
    tags: HashMap<&'a str, &'a str>,
    prefix: Option<&'a str>,
    command: &'a str,
    params: Vec<&'a str>,
    trailing: Option<&'a str>,
}

/// What the connection loop does with one inbound line.
#[derive(Debug)]
pub enum ParsedLine {
    /// Server keepalive; answer with PONG carrying the same payload.
    Ping { payload: String },
    Event(ChatEvent),
}

/// Parse one inbound IRC line.
///
/// `self_nick` marks messages sent by this identity itself so the listener
/// can skip them.
#[must_use]
pub fn parse_line(line: &str, self_nick: &str) -> Option<ParsedLine> {
    let raw = split_line(line.trim_end_matches(['\r', '\n']))?;

    match raw.command {
        "PING" => Some(ParsedLine::Ping {
            payload: raw.trailing.unwrap_or("").to_string(),
        }),
        "PRIVMSG" => {
            let channel = (*raw.params.first()?).to_string();
            let nick = prefix_nick(raw.prefix?);
            let sender = raw
                .tags
                .get("display-name")
                .filter(|n| !n.is_empty())
                .map_or_else(|| nick.to_string(), |n| (*n).to_string());

            Some(ParsedLine::Event(ChatEvent::Message {
                channel,
                sender,
                roles: roles_from_tags(&raw.tags),
                text: raw.trailing.unwrap_or("").to_string(),
                is_self: nick.eq_ignore_ascii_case(self_nick),
            }))
        },
        "USERNOTICE" if raw.tags.get("msg-id") == Some(&"raid") => {
            let channel = (*raw.params.first()?).to_string();
            let raider = raw
                .tags
                .get("msg-param-displayName")
                .or_else(|| raw.tags.get("msg-param-login"))?;
            let viewers = raw
                .tags
                .get("msg-param-viewerCount")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);

            Some(ParsedLine::Event(ChatEvent::Raid {
                channel,
                raider: (*raider).to_string(),
                viewers,
            }))
        },
        _ => None,
    }
}

fn split_line(line: &str) -> Option<RawLine<'_>> {
    let mut rest = line;

    let mut tags = HashMap::new();
    if let Some(tagged) = rest.strip_prefix('@') {
        let (tag_part, remainder) = tagged.split_once(' ')?;
        for pair in tag_part.split(';') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            tags.insert(key, value);
        }
        rest = remainder;
    }

    let mut prefix = None;
    if let Some(prefixed) = rest.strip_prefix(':') {
        let (p, remainder) = prefixed.split_once(' ')?;
        prefix = Some(p);
        rest = remainder;
    }

    let (middle, trailing) = match rest.split_once(" :") {
        Some((m, t)) => (m, Some(t)),
        None => (rest, None),
    };

    let mut words = middle.split_ascii_whitespace();
    let command = words.next()?;
    let params = words.collect();

    Some(RawLine {
        tags,
        prefix,
        command,
        params,
        trailing,
    })
}

/// The nick portion of a `nick!user@host` prefix.
fn prefix_nick(prefix: &str) -> &str {
    prefix.split('!').next().unwrap_or(prefix)
}

/// Map badge and flag tags onto role flags.
///
/// Subscriber status also counts badge-granting subscriptions (`premium`
/// shows up for some plans instead of the subscriber badge).
fn roles_from_tags(tags: &HashMap<&str, &str>) -> CallerRoles {
    let badges = tags.get("badges").copied().unwrap_or("");
    let has_badge = |name: &str| {
        badges
            .split(',')
            .any(|b| b.split('/').next() == Some(name))
    };

    CallerRoles {
        broadcaster: has_badge("broadcaster"),
        moderator: tags.get("mod") == Some(&"1") || has_badge("moderator"),
        vip: tags.get("vip") == Some(&"1") || has_badge("vip"),
        subscriber: tags.get("subscriber") == Some(&"1")
            || has_badge("subscriber")
            || has_badge("premium"),
    }
}
