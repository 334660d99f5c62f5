//! Top-level admin subcommands: privacy policy, rarity listings, completion and
//! per-collectible counts.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            checks::{is_root, is_root_or_admin},
            emoji::catalog_emojis,
            handlers::autocomplete::{autocomplete_active_special, autocomplete_special},
            pagination::FieldPages,
            reply_ephemeral,
            transform::{self, ResponseState},
        },
        core::{
            completion::{completion_description, empty_dex_message, global_completion},
            instance::InstanceFilter,
            listing::{
                self, CountList, count_list_title, empty_count_list_message,
                no_collectibles_message, no_events_message, rarity_entries, rarity_title,
                special_rarity_entries, special_rarity_title,
            },
            player::{self, PrivacyOutcome},
        },
        entities::PrivacyPolicy,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Policy choices offered by the privacy command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
    pub enum PolicyChoice {
        #[name = "Open Inventory"]
        OpenInventory,
        #[name = "Private Inventory"]
        PrivateInventory,
        #[name = "Same Server"]
        SameServer,
    }

    impl From<PolicyChoice> for PrivacyPolicy {
        fn from(choice: PolicyChoice) -> Self {
            match choice {
                PolicyChoice::OpenInventory => Self::Allow,
                PolicyChoice::PrivateInventory => Self::Deny,
                PolicyChoice::SameServer => Self::SameServer,
            }
        }
    }

    /// Set the bot's privacy policy.
    #[poise::command(slash_command, guild_only, check = "is_root")]
    pub async fn privacy(
        ctx: Context<'_>,
        #[description = "The new privacy policy to choose"] policy: PolicyChoice,
    ) -> Result<()> {
        let data = ctx.data();
        let outcome = player::set_bot_privacy_policy(
            &data.database,
            &data.settings.bot_name,
            policy.into(),
            data.members_intent,
        )
        .await?;

        match outcome {
            PrivacyOutcome::MissingMembersIntent => {
                reply_ephemeral(ctx, player::MEMBERS_INTENT_REQUIRED).await?;
            }
            PrivacyOutcome::Updated(updated) => {
                info!("Bot privacy policy set to {}", updated.privacy_policy.name());
                reply_ephemeral(ctx, player::privacy_confirmation(updated.privacy_policy)).await?;
            }
        }
        Ok(())
    }

    /// Generate a list of countryballs ranked by rarity.
    #[poise::command(slash_command, guild_only, check = "is_root")]
    pub async fn rarity(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let emojis = catalog_emojis(ctx, &data.catalog);
        let entries = rarity_entries(&data.catalog, |id| emojis.get(&id).cloned());

        if entries.is_empty() {
            reply_ephemeral(ctx, no_collectibles_message(&data.settings.bot_name)).await?;
            return Ok(());
        }

        let author = ctx.author();
        FieldPages::new(entries, rarity_title(&data.settings.bot_name))
            .author(author.display_name(), author.face())
            .start(ctx, true)
            .await
    }

    /// Generate a list of specials ranked by how many copies carry them.
    #[poise::command(slash_command, guild_only, check = "is_root_or_admin")]
    pub async fn special_rarity(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        if data.catalog.specials().next().is_none() {
            reply_ephemeral(ctx, no_events_message(&data.settings.bot_name)).await?;
            return Ok(());
        }

        ctx.defer_ephemeral().await?;
        let entries = special_rarity_entries(&data.database, &data.catalog).await?;

        let author = ctx.author();
        FieldPages::new(entries, special_rarity_title(&data.settings.bot_name))
            .author(author.display_name(), author.face())
            .start(ctx, true)
            .await
    }

    /// Show the global dex progression.
    #[poise::command(slash_command, guild_only, check = "is_root_or_admin")]
    pub async fn completion(
        ctx: Context<'_>,
        #[description = "The special you want to see the completion of"]
        #[autocomplete = "autocomplete_active_special"]
        special: Option<String>,
        #[description = "Whether you want to see the completion of shiny countryballs"]
        shiny: Option<bool>,
    ) -> Result<()> {
        let mut state = ResponseState::default();
        let special = transform::special(ctx, &mut state, special.as_deref(), true).await?;
        if state.is_done() {
            return Ok(());
        }

        let data = ctx.data();
        let settings = &data.settings;
        let shiny_only = shiny.unwrap_or(false);
        let special_name = special.as_ref().map(|s| s.name.as_str());
        let emojis = catalog_emojis(ctx, &data.catalog);

        ctx.defer().await?;
        let completion = global_completion(
            &data.database,
            &data.catalog,
            special.as_ref(),
            shiny,
            &settings.plural_collectible_name,
            |id| emojis.get(&id).cloned(),
        )
        .await?;

        let Some(completion) = completion else {
            ctx.say(empty_dex_message(
                special_name,
                shiny_only,
                &settings.plural_collectible_name,
            ))
            .await?;
            return Ok(());
        };

        let description =
            completion_description(&settings.bot_name, special_name, shiny_only, &completion);
        let (bot_name, bot_avatar) = {
            let current = ctx.cache().current_user();
            (current.name.clone(), current.face())
        };
        FieldPages::new(completion.entries, description)
            .author(bot_name, bot_avatar)
            .start(ctx, false)
            .await
    }

    /// List how many copies of each countryball exist.
    #[poise::command(slash_command, guild_only, check = "is_root_or_admin")]
    pub async fn count_list(
        ctx: Context<'_>,
        #[description = "The user you want to list the counts of"] user: Option<serenity::User>,
        #[description = "Whether you want to list shiny countryballs only"] shiny: Option<bool>,
        #[description = "The special you want to list the counts of"]
        #[autocomplete = "autocomplete_special"]
        special: Option<String>,
    ) -> Result<()> {
        let mut state = ResponseState::default();
        let special = transform::special(ctx, &mut state, special.as_deref(), false).await?;
        if state.is_done() {
            return Ok(());
        }

        let data = ctx.data();
        let settings = &data.settings;
        let shiny_only = shiny.unwrap_or(false);
        let special_name = special.as_ref().map(|s| s.name.as_str());
        let user_tag = user.as_ref().map(serenity::User::tag);
        let filter = InstanceFilter {
            player_discord_id: user.as_ref().map(|u| i64::try_from(u.id.get())).transpose()?,
            shiny,
            special_id: special.as_ref().map(|s| s.id),
            ..Default::default()
        };
        let emojis = catalog_emojis(ctx, &data.catalog);

        ctx.defer_ephemeral().await?;
        let outcome = listing::count_list(&data.database, &data.catalog, &filter, |id| {
            emojis.get(&id).cloned()
        })
        .await?;

        let entries = match outcome {
            CountList::Entries(entries) => entries,
            CountList::NoCollectibles => {
                reply_ephemeral(ctx, no_collectibles_message(&settings.bot_name)).await?;
                return Ok(());
            }
            CountList::Nothing => {
                reply_ephemeral(
                    ctx,
                    empty_count_list_message(
                        user_tag.as_deref(),
                        special_name,
                        shiny_only,
                        &settings.plural_collectible_name,
                    ),
                )
                .await?;
                return Ok(());
            }
        };

        let author = ctx.author();
        FieldPages::new(
            entries,
            count_list_title(&settings.bot_name, special_name, shiny_only),
        )
        .author(author.display_name(), author.face())
        .start(ctx, true)
        .await
    }
}

// Re-export all commands
pub use inner::*;
