//! Custom emoji lookup.
//!
//! Collectibles store a bare emoji id; the rendered form (`<:name:id>`) is found
//! in the emoji lists of the guilds held in the gateway cache.

use crate::{bot::Context, core::catalog::Catalog};
use poise::serenity_prelude as serenity;
use std::collections::HashMap;

/// Renders the custom emoji with this id, if any cached guild has it.
#[must_use]
pub fn resolve_emoji(ctx: Context<'_>, emoji_id: i64) -> Option<String> {
    let raw = u64::try_from(emoji_id).ok().filter(|&id| id != 0)?;
    let emoji_id = serenity::EmojiId::new(raw);
    let cache = ctx.cache();

    cache.guilds().into_iter().find_map(|guild_id| {
        cache
            .guild(guild_id)
            .and_then(|guild| guild.emojis.get(&emoji_id).map(ToString::to_string))
    })
}

/// Resolves every collectible emoji of the catalog at once.
///
/// Handlers build this before awaiting so no cache guard is held across I/O.
#[must_use]
pub fn catalog_emojis(ctx: Context<'_>, catalog: &Catalog) -> HashMap<i64, String> {
    catalog
        .balls()
        .filter_map(|ball| resolve_emoji(ctx, ball.emoji_id).map(|emoji| (ball.emoji_id, emoji)))
        .collect()
}
