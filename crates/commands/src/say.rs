use std::collections::HashMap;

use {
    moneta_sessions::IdentitySession,
    moneta_templates::{LiveContext, render},
};

use crate::error::Result;

/// Pick a random template from `category` and send it, expanded against live
/// platform data for `subject` plus `extra` values.
///
/// The stream-info fetch only happens when the chosen candidate actually
/// contains a placeholder.
pub async fn say_random(
    session: &IdentitySession,
    channel: &str,
    subject: &str,
    category: &str,
    extra: &HashMap<String, String>,
) -> Result<()> {
    let candidate = session.templates.pick(category)?;

    let message = if candidate.contains('{') {
        let stream = session.api.fetch_current_stream(subject).await?;
        let live = LiveContext {
            display_name: subject.to_string(),
            game_name: stream.map(|s| s.game_name).filter(|g| !g.is_empty()),
        };
        render(&candidate, Some(&live), extra)
    } else {
        candidate
    };

    session.transport.send_message(channel, &message).await?;
    Ok(())
}
