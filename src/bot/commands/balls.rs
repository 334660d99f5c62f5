//! The collectible group: force spawn, grant and count.
//!
//! The group is registered as `balls` and renamed at registration time to the
//! configured `players_group_cog_name`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            audit::log_action,
            checks::is_root_or_admin,
            handlers::autocomplete::{autocomplete_ball, autocomplete_special},
            reply_ephemeral,
            spawn::spawn_in_channel,
            transform::{self, ResponseState},
        },
        core::{
            instance::{
                self, CountLabels, GrantOutcome, GrantOverrides, InstanceFilter, check_grant,
                count_sentence, grant_audit_line, grant_confirmation,
            },
            spawn::{SpawnCandidate, not_tradeable_message, spawn_audit_line},
        },
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Countryball management
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("spawn", "give", "count"),
        subcommand_required
    )]
    pub async fn balls(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Force spawn a random or specified countryball.
    #[poise::command(slash_command, guild_only, check = "is_root_or_admin")]
    pub async fn spawn(
        ctx: Context<'_>,
        #[description = "The countryball you want to spawn. Random according to rarities if not specified"]
        #[autocomplete = "autocomplete_ball"]
        countryball: Option<String>,
        #[description = "The channel you want to spawn the countryball in"]
        #[channel_types("Text")]
        channel: Option<serenity::GuildChannel>,
    ) -> Result<()> {
        let mut state = ResponseState::default();
        let ball = transform::ball(ctx, &mut state, countryball.as_deref()).await?;
        if state.is_done() {
            return Ok(());
        }

        let data = ctx.data();
        let settings = &data.settings;
        if ball.as_ref().is_some_and(|b| !b.tradeable) {
            reply_ephemeral(ctx, not_tradeable_message("spawn", &settings.collectible_name))
                .await?;
            return Ok(());
        }

        ctx.defer_ephemeral().await?;
        let candidate = match ball {
            Some(ball) => SpawnCandidate::new(ball),
            None => SpawnCandidate::random(&data.catalog, &mut rand::thread_rng())?,
        };

        let (channel_id, channel_name) = match channel {
            Some(channel) => (channel.id, channel.name),
            None => {
                let name = ctx
                    .guild_channel()
                    .await
                    .map_or_else(|| ctx.channel_id().to_string(), |c| c.name);
                (ctx.channel_id(), name)
            }
        };
        spawn_in_channel(ctx, &candidate, channel_id).await?;

        ctx.say(format!("{} spawned.", settings.collectible_title()))
            .await?;
        log_action(
            ctx,
            &spawn_audit_line(
                &ctx.author().tag(),
                &settings.collectible_name,
                &candidate,
                &channel_name,
            ),
        )
        .await;
        Ok(())
    }

    /// Give the specified countryball to a player.
    #[poise::command(slash_command, guild_only, check = "is_root_or_admin")]
    pub async fn give(
        ctx: Context<'_>,
        #[description = "The countryball you want to give"]
        #[autocomplete = "autocomplete_ball"]
        countryball: String,
        #[description = "The user you want to give a countryball to"] user: serenity::User,
        #[description = "The special you want to give"]
        #[autocomplete = "autocomplete_special"]
        special: Option<String>,
        #[description = "Whether the countryball should be shiny"] shiny: Option<bool>,
        #[description = "The health bonus in percentage. Random if not specified"]
        health_bonus: Option<i32>,
        #[description = "The attack bonus in percentage. Random if not specified"]
        attack_bonus: Option<i32>,
    ) -> Result<()> {
        let mut state = ResponseState::default();
        let ball = transform::ball(ctx, &mut state, Some(&countryball)).await?;
        if state.is_done() {
            return Ok(());
        }
        let special = transform::special(ctx, &mut state, special.as_deref(), false).await?;
        let Some(ball) = ball.filter(|_| !state.is_done()) else {
            return Ok(());
        };

        let data = ctx.data();
        let settings = &data.settings;
        if let Some(refusal) = check_grant(&ball, special.as_ref()) {
            reply_ephemeral(ctx, refusal.message(&settings.collectible_name)).await?;
            return Ok(());
        }

        ctx.defer_ephemeral().await?;
        let rolls = GrantOverrides {
            shiny,
            attack_bonus,
            health_bonus,
        }
        .resolve(&mut rand::thread_rng());
        let special_name = special.as_ref().map(|s| s.name.as_str());
        let outcome = instance::give(
            &data.database,
            &ball,
            i64::try_from(user.id.get())?,
            special.as_ref(),
            rolls,
        )
        .await?;
        let granted = match outcome {
            GrantOutcome::Granted(granted) => granted,
            GrantOutcome::Refused(refusal) => {
                ctx.say(refusal.message(&settings.collectible_name)).await?;
                return Ok(());
            }
        };

        let recipient = user.tag();
        ctx.say(grant_confirmation(
            &ball.country,
            &settings.collectible_name,
            &recipient,
            special_name,
            &granted,
        ))
        .await?;
        log_action(
            ctx,
            &grant_audit_line(
                &ctx.author().tag(),
                &settings.collectible_name,
                &ball.country,
                &recipient,
                special_name,
                &granted,
            ),
        )
        .await;
        Ok(())
    }

    /// Count the number of countryballs that a player has or how many exist in total.
    #[poise::command(slash_command, guild_only, check = "is_root_or_admin")]
    pub async fn count(
        ctx: Context<'_>,
        #[description = "The user you want to count the countryballs of"]
        user: Option<serenity::User>,
        #[description = "The countryball you want to count"]
        #[autocomplete = "autocomplete_ball"]
        countryball: Option<String>,
        #[description = "Whether you want to count shiny countryballs"] shiny: Option<bool>,
        #[description = "The special you want to count"]
        #[autocomplete = "autocomplete_special"]
        special: Option<String>,
    ) -> Result<()> {
        let mut state = ResponseState::default();
        let ball = transform::ball(ctx, &mut state, countryball.as_deref()).await?;
        if state.is_done() {
            return Ok(());
        }
        let special = transform::special(ctx, &mut state, special.as_deref(), false).await?;
        if state.is_done() {
            return Ok(());
        }

        let filter = InstanceFilter {
            player_discord_id: user
                .as_ref()
                .map(|u| i64::try_from(u.id.get()))
                .transpose()?,
            ball_id: ball.as_ref().map(|b| b.id),
            shiny,
            special_id: special.as_ref().map(|s| s.id),
            ..Default::default()
        };

        ctx.defer_ephemeral().await?;
        let data = ctx.data();
        let total = instance::count_instances(&data.database, &filter).await?;

        let user_tag = user.as_ref().map(serenity::User::tag);
        let labels = CountLabels {
            user: user_tag.as_deref(),
            country: ball.as_ref().map(|b| b.country.as_str()),
            special: special.as_ref().map(|s| s.name.as_str()),
            shiny: shiny.unwrap_or(false),
        };
        ctx.say(count_sentence(total, &labels, &data.settings.collectible_name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
