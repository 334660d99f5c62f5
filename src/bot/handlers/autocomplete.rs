//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the in-memory catalog, so no database round trip is
//! needed while the user types.

use crate::bot::Context;
use chrono::Utc;

/// Suggests collectibles whose name contains the partial input.
pub async fn autocomplete_ball(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data().catalog.search_balls(partial)
}

/// Suggests any registered special.
pub async fn autocomplete_special(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data().catalog.search_specials(partial, None)
}

/// Suggests specials that are currently running and not hidden.
pub async fn autocomplete_active_special(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data()
        .catalog
        .search_specials(partial, Some(Utc::now()))
}
