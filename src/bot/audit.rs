//! Audit sink - records privileged actions.
//!
//! Every line goes to the `audit` tracing target and, when a log channel is
//! configured, to that Discord channel. Posting failures are only logged.

use crate::bot::Context;
use poise::serenity_prelude as serenity;

/// Records one audit line.
pub async fn log_action(ctx: Context<'_>, message: &str) {
    tracing::info!(target: "audit", "{message}");

    let Some(channel_id) = ctx.data().settings.log_channel.filter(|&id| id != 0) else {
        return;
    };

    if let Err(e) = serenity::ChannelId::new(channel_id)
        .say(ctx.serenity_context(), message)
        .await
    {
        tracing::error!("Failed to post audit line to channel {channel_id}: {e}");
    }
}
