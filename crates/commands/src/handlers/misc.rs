use std::collections::HashMap;

use crate::{dispatch::{Dispatcher, Invocation}, error::Result, say};

pub(crate) async fn lurk(invocation: &Invocation<'_>) -> Result<()> {
    say::say_random(
        invocation.session,
        invocation.channel,
        invocation.caller,
        "lurk",
        &HashMap::new(),
    )
    .await
}

/// Shout out the channel named by the first argument.
pub(crate) async fn shoutout(invocation: &Invocation<'_>) -> Result<()> {
    let Some(target) = invocation.args.first() else {
        return Ok(());
    };
    say::say_random(
        invocation.session,
        invocation.channel,
        target,
        "shoutout",
        &HashMap::new(),
    )
    .await
}

/// Fetch a quote and feed it to the "kanye" templates as `{quote}`.
pub(crate) async fn kanye(dispatcher: &Dispatcher, invocation: &Invocation<'_>) -> Result<()> {
    let quote = dispatcher.quotes().fetch_quote().await?;

    let mut extra = HashMap::new();
    extra.insert("quote".to_string(), quote);

    say::say_random(
        invocation.session,
        invocation.channel,
        invocation.caller,
        "kanye",
        &extra,
    )
    .await
}
