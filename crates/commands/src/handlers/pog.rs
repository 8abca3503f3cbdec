use moneta_common::channel_login;

use crate::{dispatch::Invocation, error::Result};

/// The terms toggled by unpog/freepog.
const POG_TERMS: [&str; 3] = ["pogchamp", "poggers", "pog"];

/// Block the pog terms in the invoking channel.
pub(crate) async fn unpog(invocation: &Invocation<'_>) -> Result<()> {
    let session = invocation.session;
    session.say(invocation.channel, "/me unpogs your champ").await?;

    let broadcaster_id = session.api.fetch_user_id(channel_login(invocation.channel)).await?;
    let moderator_id = session.api.fetch_user_id(&session.name).await?;

    for term in POG_TERMS {
        session
            .api
            .add_blocked_term(term, &broadcaster_id, &moderator_id)
            .await?;
    }
    Ok(())
}

/// Unblock the pog terms. Deletion is by id, so the current list is fetched
/// first; terms that are not blocked are skipped.
pub(crate) async fn freepog(invocation: &Invocation<'_>) -> Result<()> {
    let session = invocation.session;
    session
        .say(invocation.channel, "/me pogs your champ PogChamp")
        .await?;

    let broadcaster_id = session.api.fetch_user_id(channel_login(invocation.channel)).await?;
    let moderator_id = session.api.fetch_user_id(&session.name).await?;

    let current = session
        .api
        .list_blocked_terms(&broadcaster_id, &moderator_id)
        .await?;

    for term in POG_TERMS {
        if let Some(hit) = current.iter().find(|t| t.text == term) {
            session
                .api
                .remove_blocked_term(&hit.id, &broadcaster_id, &moderator_id)
                .await?;
        }
    }
    Ok(())
}
