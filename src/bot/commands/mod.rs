//! Discord command implementations and the command tree registered per guild.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Privacy, rarity listings, completion and count lists
pub mod admin;
/// Collectible group: spawn, give, count
pub mod balls;

use crate::{
    bot::{BotData, Context},
    config::Settings,
    errors::{Error, Result},
};

/// Name of the privacy choice that needs the members intent
const SAME_SERVER_CHOICE: &str = "Same Server";

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{
        Context, Result,
        admin::{completion, count_list, privacy, rarity, special_rarity},
        balls::balls,
    };

    /// Bot admin commands
    #[poise::command(
        slash_command,
        guild_only,
        default_member_permissions = "ADMINISTRATOR",
        subcommands(
            "privacy",
            "rarity",
            "special_rarity",
            "completion",
            "count_list",
            "balls"
        ),
        subcommand_required
    )]
    pub async fn adminplus(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }
}

pub use inner::*;

/// Builds the command tree for this deployment.
///
/// The collectible group takes the configured `players_group_cog_name`, and the
/// `Same Server` privacy choice is dropped when the members intent is off.
#[must_use]
pub fn commands(settings: &Settings, members_intent: bool) -> Vec<poise::Command<BotData, Error>> {
    let mut root = adminplus();

    for command in &mut root.subcommands {
        match command.name.as_str() {
            "balls" => command.name.clone_from(&settings.players_group_cog_name),
            "privacy" if !members_intent => {
                if let Some(policy) = command.parameters.first_mut() {
                    policy
                        .choices
                        .retain(|choice| choice.name != SAME_SERVER_CHOICE);
                }
            }
            _ => {}
        }
    }

    vec![root]
}
