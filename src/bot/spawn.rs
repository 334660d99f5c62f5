//! Posting a spawned collectible in a channel.

use crate::{
    bot::{Context, emoji::resolve_emoji},
    core::spawn::SpawnCandidate,
    errors::Result,
};
use poise::serenity_prelude as serenity;

/// Announces `candidate` in `channel_id`. The collectible's name stays hidden;
/// only its emoji is shown.
pub async fn spawn_in_channel(
    ctx: Context<'_>,
    candidate: &SpawnCandidate,
    channel_id: serenity::ChannelId,
) -> Result<()> {
    let settings = &ctx.data().settings;
    let mut message = serenity::CreateMessage::new()
        .content(format!("A wild {} appeared!", settings.collectible_name));

    if let Some(emoji) = resolve_emoji(ctx, candidate.ball.emoji_id) {
        message = message.embed(
            serenity::CreateEmbed::new()
                .description(emoji)
                .colour(serenity::Colour::BLURPLE),
        );
    }

    channel_id
        .send_message(ctx.serenity_context(), message)
        .await?;
    tracing::debug!("Spawned {} in {}", candidate.name(), channel_id);
    Ok(())
}
