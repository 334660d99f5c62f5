//! Parameter transforms.
//!
//! Slash parameters arrive as the text picked from autocomplete (an id or a
//! name). Transforms turn them into catalog models. When lookup fails, the
//! transform itself answers the invoker and marks the [`ResponseState`] so the
//! command stops without replying a second time.

use crate::{
    bot::{Context, reply_ephemeral},
    entities::{ball, special},
    errors::Result,
};
use chrono::Utc;

/// Tracks whether the interaction was already answered during parameter handling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResponseState {
    responded: bool,
}

impl ResponseState {
    /// `true` once a transform replied to the invoker
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.responded
    }

    const fn mark_done(&mut self) {
        self.responded = true;
    }
}

fn not_found_message(noun: &str) -> String {
    format!("The {noun} could not be found. Make sure to use the autocomplete function on this command.")
}

/// Resolves an optional collectible parameter.
pub async fn ball(
    ctx: Context<'_>,
    state: &mut ResponseState,
    input: Option<&str>,
) -> Result<Option<ball::Model>> {
    let Some(input) = input else {
        return Ok(None);
    };

    if let Some(found) = ctx.data().catalog.find_ball(input) {
        return Ok(Some(found.clone()));
    }

    reply_ephemeral(ctx, not_found_message(&ctx.data().settings.collectible_name)).await?;
    state.mark_done();
    Ok(None)
}

/// Resolves an optional special parameter. With `active_only`, specials that are
/// hidden or outside their date window are treated as missing.
pub async fn special(
    ctx: Context<'_>,
    state: &mut ResponseState,
    input: Option<&str>,
    active_only: bool,
) -> Result<Option<special::Model>> {
    let Some(input) = input else {
        return Ok(None);
    };

    let found = ctx
        .data()
        .catalog
        .find_special_at(input, active_only.then(Utc::now));
    if let Some(found) = found {
        return Ok(Some(found.clone()));
    }

    reply_ephemeral(ctx, not_found_message("special")).await?;
    state.mark_done();
    Ok(None)
}
