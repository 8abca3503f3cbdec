use std::collections::HashMap;

use crate::{dispatch::{Dispatcher, Invocation}, error::Result, say};

/// Store `args[0]` as a custom command whose text is the remaining
/// arguments joined by spaces, then confirm.
pub(crate) async fn add_custom(dispatcher: &Dispatcher, invocation: &Invocation<'_>) -> Result<()> {
    let Some(name) = invocation.args.first() else {
        return Ok(());
    };
    let text = invocation.args[1..].join(" ");

    dispatcher
        .registry()
        .custom()
        .register(invocation.channel, name, &text);

    say::say_random(
        invocation.session,
        invocation.channel,
        invocation.caller,
        "customCommand",
        &HashMap::new(),
    )
    .await
}

/// Run a stored custom command.
///
/// With arguments this becomes an inline edit: re-dispatch to
/// [`add_custom`] with the command word as the name (the registry already
/// escalated the tier to Mods for this path). Without arguments, the stored
/// text goes out verbatim.
pub(crate) async fn call_custom(
    dispatcher: &Dispatcher,
    invocation: &Invocation<'_>,
) -> Result<()> {
    if !invocation.args.is_empty() {
        let mut args = Vec::with_capacity(invocation.args.len() + 1);
        args.push(invocation.word.to_string());
        args.extend(invocation.args.iter().cloned());

        let edit = Invocation {
            args: &args,
            ..*invocation
        };
        return add_custom(dispatcher, &edit).await;
    }

    let Some(text) = dispatcher
        .registry()
        .custom()
        .get(invocation.channel, invocation.word)
    else {
        return Ok(());
    };
    invocation.session.say(invocation.channel, &text).await?;
    Ok(())
}
