//! Player business logic - lazy player creation and the bot's privacy policy.

use crate::{
    entities::{Player, PrivacyPolicy, player},
    errors::Result,
};
use sea_orm::{Set, prelude::*};
use tracing::instrument;

/// Player row that stands for the bot account when its name is `dragonballdex`
pub const DRAGONBALLDEX_PLAYER_ID: i64 = 1_293_338_035_500_351_538;

/// Player row that stands for the bot account on every other deployment
pub const DEFAULT_BOT_PLAYER_ID: i64 = 1_237_889_057_330_303_057;

/// Reply when `SameServer` is requested without the members intent
pub const MEMBERS_INTENT_REQUIRED: &str = "I need the `members` intent to use this policy.";

/// Discord id of the player record holding the bot's own privacy policy.
#[must_use]
pub fn bot_player_id(bot_name: &str) -> i64 {
    if bot_name == "dragonballdex" {
        DRAGONBALLDEX_PLAYER_ID
    } else {
        DEFAULT_BOT_PLAYER_ID
    }
}

/// Finds a player by Discord id without creating it.
pub async fn get_player<C>(db: &C, discord_id: i64) -> Result<Option<player::Model>>
where
    C: ConnectionTrait,
{
    Player::find()
        .filter(player::Column::DiscordId.eq(discord_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the player for `discord_id`, inserting it with a private inventory first
/// if it does not exist. The flag is `true` when the row was just created.
pub async fn get_or_create_player<C>(db: &C, discord_id: i64) -> Result<(player::Model, bool)>
where
    C: ConnectionTrait,
{
    if let Some(existing) = get_player(db, discord_id).await? {
        return Ok((existing, false));
    }

    let created = player::ActiveModel {
        discord_id: Set(discord_id),
        privacy_policy: Set(PrivacyPolicy::Deny),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::debug!("Created player for discord id {discord_id}");

    Ok((created, true))
}

/// Result of a privacy policy change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivacyOutcome {
    /// `SameServer` needs the members intent; nothing was written
    MissingMembersIntent,
    /// The bot player now carries the requested policy
    Updated(player::Model),
}

/// Sets the privacy policy stored on the bot's own player record.
///
/// `SameServer` is refused when the bot runs without the members intent, in which
/// case the database is left untouched.
#[instrument(skip(db))]
pub async fn set_bot_privacy_policy(
    db: &DatabaseConnection,
    bot_name: &str,
    policy: PrivacyPolicy,
    members_intent: bool,
) -> Result<PrivacyOutcome> {
    if policy == PrivacyPolicy::SameServer && !members_intent {
        return Ok(PrivacyOutcome::MissingMembersIntent);
    }

    let (player, _) = get_or_create_player(db, bot_player_id(bot_name)).await?;
    let mut active_model: player::ActiveModel = player.into();
    active_model.privacy_policy = Set(policy);
    let updated = active_model.update(db).await?;

    Ok(PrivacyOutcome::Updated(updated))
}

/// Confirmation shown after the policy was saved.
#[must_use]
pub fn privacy_confirmation(policy: PrivacyPolicy) -> String {
    format!(
        "The bot's privacy policy has been set to **{}**.",
        policy.name()
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use sea_orm::PaginatorTrait;

    #[test]
    fn test_bot_player_id() {
        assert_eq!(bot_player_id("dragonballdex"), DRAGONBALLDEX_PLAYER_ID);
        assert_eq!(bot_player_id("BallsDex"), DEFAULT_BOT_PLAYER_ID);
    }

    #[tokio::test]
    async fn test_get_or_create_player_is_lazy() -> Result<()> {
        let db = setup_test_db().await?;

        let (first, created) = get_or_create_player(&db, 42).await?;
        assert!(created);
        assert_eq!(first.discord_id, 42);
        assert_eq!(first.privacy_policy, PrivacyPolicy::Deny);

        let (second, created) = get_or_create_player(&db, 42).await?;
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(Player::find().count(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_bot_privacy_policy_persists_every_choice() -> Result<()> {
        let db = setup_test_db().await?;

        for policy in [
            PrivacyPolicy::Allow,
            PrivacyPolicy::Deny,
            PrivacyPolicy::SameServer,
        ] {
            let outcome = set_bot_privacy_policy(&db, "BallsDex", policy, true).await?;
            assert!(matches!(outcome, PrivacyOutcome::Updated(_)));

            let stored = get_player(&db, DEFAULT_BOT_PLAYER_ID).await?.unwrap();
            assert_eq!(stored.privacy_policy, policy);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_same_server_without_members_intent_is_refused() -> Result<()> {
        let db = setup_test_db().await?;

        let outcome =
            set_bot_privacy_policy(&db, "BallsDex", PrivacyPolicy::SameServer, false).await?;
        assert_eq!(outcome, PrivacyOutcome::MissingMembersIntent);
        assert!(get_player(&db, DEFAULT_BOT_PLAYER_ID).await?.is_none());

        // An existing policy is left alone as well
        set_bot_privacy_policy(&db, "BallsDex", PrivacyPolicy::Allow, false).await?;
        let outcome =
            set_bot_privacy_policy(&db, "BallsDex", PrivacyPolicy::SameServer, false).await?;
        assert_eq!(outcome, PrivacyOutcome::MissingMembersIntent);
        let stored = get_player(&db, DEFAULT_BOT_PLAYER_ID).await?.unwrap();
        assert_eq!(stored.privacy_policy, PrivacyPolicy::Allow);

        Ok(())
    }

    #[test]
    fn test_privacy_confirmation() {
        assert_eq!(
            privacy_confirmation(PrivacyPolicy::SameServer),
            "The bot's privacy policy has been set to **SAME_SERVER**."
        );
    }
}
