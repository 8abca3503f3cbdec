use std::{collections::HashMap, time::Duration};

use {tokio::time::sleep, tracing::info};

use crate::{dispatch::{Dispatcher, Invocation}, error::Result, say};

/// Settle time before moving the active pointer, so the newly active
/// identity does not pick up the message that triggered the swap.
const SWAP_SETTLE: Duration = Duration::from_millis(500);

pub(crate) async fn swap(dispatcher: &Dispatcher, invocation: &Invocation<'_>) -> Result<()> {
    sleep(SWAP_SETTLE).await;

    let next = dispatcher.switchboard().advance();
    info!(from = %invocation.session.name, to = %next.name, "active identity advanced");

    say::say_random(
        &next,
        invocation.channel,
        invocation.caller,
        "swap",
        &HashMap::new(),
    )
    .await
}

pub(crate) async fn swap_to(dispatcher: &Dispatcher, invocation: &Invocation<'_>) -> Result<()> {
    sleep(SWAP_SETTLE).await;

    let target = invocation.args.first().map(String::as_str).unwrap_or("");
    let Some(next) = dispatcher.switchboard().select_by_name(target) else {
        // Unknown identity: raw swapFail line from the invoking identity,
        // active pointer untouched.
        let text = invocation.session.templates.pick("swapFail")?;
        invocation.session.say(invocation.channel, &text).await?;
        return Ok(());
    };

    info!(from = %invocation.session.name, to = %next.name, "active identity selected");
    say::say_random(
        &next,
        invocation.channel,
        invocation.caller,
        "swap",
        &HashMap::new(),
    )
    .await
}
