//! Bot layer - Discord-specific interface and command handlers
//!
//! This module wires the core operations into poise: the command tree, role
//! checks, parameter transforms, the paginated embed presenter and the audit sink.

/// Saving Discord attachments to the upload directory
pub mod attachments;
/// Audit log sink
pub mod audit;
/// Role checks used by every command
pub mod checks;
/// Discord command implementations and their registration
pub mod commands;
/// Custom emoji lookup in the gateway cache
pub mod emoji;
/// Discord interaction handlers (autocomplete)
pub mod handlers;
/// Paginated embed presenter
pub mod pagination;
/// Posting spawned collectibles
pub mod spawn;
/// Parameter transforms and the "already responded" state
pub mod transform;

use crate::{
    config::Settings,
    core::catalog::Catalog,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
/// This structure holds the database connection, the settings and the catalog.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings parsed from config.toml
    pub settings: Arc<Settings>,
    /// Collectible and special definitions loaded at startup
    pub catalog: Arc<Catalog>,
    /// Whether the gateway connection was opened with the members intent
    pub members_intent: bool,
}

impl BotData {
    /// Creates a new `BotData` instance. The members intent follows the settings.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Arc<Settings>, catalog: Arc<Catalog>) -> Self {
        let members_intent = settings.members_intent;
        Self {
            database,
            settings,
            catalog,
            members_intent,
        }
    }
}

/// Poise context used by every handler
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Sends a reply only the invoker can see.
pub async fn reply_ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().qualified_name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            if let Some(error) = error {
                error!("Check for `{}` failed: {:?}", ctx.command().qualified_name, error);
            }
            if let Err(e) =
                reply_ephemeral(ctx, "You do not have the required role to use this command.").await
            {
                error!("Failed to send check failure message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and serves the admin commands until the client stops.
///
/// Commands are registered in every configured admin guild, never globally.
#[instrument(skip_all)]
pub async fn run_bot(
    token: String,
    settings: Arc<Settings>,
    catalog: Arc<Catalog>,
    database: DatabaseConnection,
) -> Result<()> {
    let setup_settings = Arc::clone(&settings);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::commands(&settings, settings.members_intent),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                if setup_settings.admin_guild_ids.is_empty() {
                    warn!("No admin guilds configured, admin commands are not registered");
                }
                for guild_id in setup_settings.admin_guild_ids.iter().copied().filter(|&id| id != 0) {
                    let guild_id = serenity::GuildId::new(guild_id);
                    poise::builtins::register_in_guild(
                        ctx,
                        &framework.options().commands,
                        guild_id,
                    )
                    .await?;
                    info!("Registered admin commands in guild {}", guild_id);
                }
                Ok(BotData::new(database, setup_settings, catalog))
            })
        })
        .build();

    // The cache needs guild emojis to render collectible emojis
    let mut intents =
        serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_EMOJIS_AND_STICKERS;
    if settings.members_intent {
        intents |= serenity::GatewayIntents::GUILD_MEMBERS;
    }

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    Ok(())
}
