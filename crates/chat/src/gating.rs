/// Decide whether an inbound message is a command for this identity and, if
/// so, return the command text with its prefix stripped.
///
/// Several identities listen on the same channels, so the rules keep exactly
/// one of them responding:
/// - the active identity answers plain `!command` messages;
/// - any identity answers when explicitly mentioned as `@<name> command`
///   (case-insensitive);
/// - everything else is ignored, including `@`-mentions of a different
///   identity.
#[must_use]
pub fn command_text<'a>(text: &'a str, identity: &str, is_active: bool) -> Option<&'a str> {
    if !is_active && !text.starts_with('@') {
        return None;
    }

    if let Some(rest) = text.strip_prefix('!') {
        return Some(rest);
    }

    strip_mention(text, identity)
}

/// Strip a leading `@<identity>` mention (with an optional following space).
/// Returns `None` when the mention is absent or names someone else.
fn strip_mention<'a>(text: &'a str, identity: &str) -> Option<&'a str> {
    let rest = text.strip_prefix('@')?;
    let mentioned = rest.get(..identity.len())?;
    if !mentioned.eq_ignore_ascii_case(identity) {
        return None;
    }

    let after = &rest[identity.len()..];
    match after.strip_prefix(' ') {
        Some(stripped) => Some(stripped),
        None if after.is_empty() => Some(""),
        // "@moneybotx ..." mentions a different, longer name.
        None => None,
    }
}
