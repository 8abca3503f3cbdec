use std::collections::HashMap;

/// Substituted for placeholders with no value anywhere. Visible in chat on
/// purpose so broken templates get reported.
pub const FALLBACK_MARKER: &str = "ERROR BEEP BOOP";

/// Live platform data a template can reference.
///
/// `game_name` is absent when the subject is not currently streaming.
#[derive(Debug, Clone, Default)]
pub struct LiveContext {
    pub display_name: String,
    pub game_name: Option<String>,
}

impl LiveContext {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "displayName" => Some(&self.display_name),
            "gameName" => self.game_name.as_deref(),
            _ => None,
        }
    }
}

/// Expand every `{name}` token in `template`.
///
/// Lookup order per token: live context field, then `extra`, then
/// [`FALLBACK_MARKER`]. The scan moves strictly forward and substituted
/// values are never rescanned, so rendering terminates even when a value
/// (e.g. user-supplied custom-command text) itself contains `{` tokens.
/// A `{` with no closing `}` is emitted literally.
#[must_use]
pub fn render(
    template: &str,
    live: Option<&LiveContext>,
    extra: &HashMap<String, String>,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            // Unterminated token: keep the raw text.
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        let value = live
            .and_then(|c| c.field(name))
            .or_else(|| extra.get(name).map(String::as_str))
            .unwrap_or(FALLBACK_MARKER);
        out.push_str(value);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
