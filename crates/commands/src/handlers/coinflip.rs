use std::{collections::HashMap, time::Duration};

use {rand::Rng, tokio::time::sleep};

use crate::{dispatch::Invocation, error::Result, say};

const USAGE: &str = "You have to call either heads or tails.";
const FLIP_SUSPENSE: Duration = Duration::from_millis(1000);
const RESULT_PAUSE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "heads" => Some(Self::Heads),
            "tails" => Some(Self::Tails),
            _ => None,
        }
    }

    fn announcement(self) -> &'static str {
        match self {
            Self::Heads => "It is... Heads!",
            Self::Tails => "It is... Tails!",
        }
    }
}

pub(crate) async fn coinflip(invocation: &Invocation<'_>) -> Result<()> {
    let Some(guess) = invocation.args.first().and_then(|a| CoinSide::parse(a)) else {
        invocation.session.say(invocation.channel, USAGE).await?;
        return Ok(());
    };

    invocation
        .session
        .say(invocation.channel, "Time to flip a coin. Here goes...")
        .await?;
    sleep(FLIP_SUSPENSE).await;

    announce(invocation, flip(), guess).await
}

/// Draw the outcome. The draw is strictly 0 or 1; the legacy bot also had a
/// "landed on its side" reply for values in between, which the generator can
/// never produce, so Heads or Tails it is.
fn flip() -> CoinSide {
    if rand::rng().random_range(0..2) == 1 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

/// Announce `outcome` and follow up with the win/lose template.
pub(crate) async fn announce(
    invocation: &Invocation<'_>,
    outcome: CoinSide,
    guess: CoinSide,
) -> Result<()> {
    invocation
        .session
        .say(invocation.channel, outcome.announcement())
        .await?;
    sleep(RESULT_PAUSE).await;

    let category = if outcome == guess { "flipWin" } else { "flipLose" };
    say::say_random(
        invocation.session,
        invocation.channel,
        invocation.caller,
        category,
        &HashMap::new(),
    )
    .await
}
