//! Ball instance business logic - granting instances and counting them.
//!
//! Granting resolves the per-copy attributes (shiny flag, attack and health
//! bonuses) from staff overrides or random draws, then inserts one row. Counting
//! builds a conjunctive filter out of whichever criteria were supplied.

use crate::{
    core::{
        format::{bool_label, plural_suffix, signed},
        player,
        spawn::not_tradeable_message,
    },
    entities::{
        Ball, BallInstance, Player, ball, ball_instance, player as player_entity, special,
    },
    errors::Result,
};
use chrono::Utc;
use rand::Rng;
use sea_orm::{PaginatorTrait, QuerySelect, Select, Set, prelude::*};
use std::{collections::BTreeSet, ops::RangeInclusive};
use tracing::instrument;

/// Specials staff are allowed to attach through `give`, matched by display name.
///
/// This duplicates data that would better live on the special itself (a
/// "grantable" flag); keep it in sync when paints are added or renamed.
pub const GRANTABLE_SPECIALS: [&str; 15] = [
    "Mythical",
    "Gold",
    "Titanium White",
    "Black",
    "Cobalt",
    "Crimson",
    "Forest Green",
    "Saffron",
    "Sky Blue",
    "Pink",
    "Purple",
    "Lime",
    "Orange",
    "Grey",
    "Burnt Sienna",
];

/// One in this many random grants is shiny
pub const SHINY_ODDS: u32 = 2048;

/// Range of randomly drawn attack and health bonuses
pub const BONUS_RANGE: RangeInclusive<i32> = -20..=20;

/// Reply when the requested special is not in [`GRANTABLE_SPECIALS`]
pub const SPECIAL_NOT_GRANTABLE: &str = "You do not have permission to give this special";

/// Whether a special with this display name may be given by staff.
#[must_use]
pub fn is_grantable_special(name: &str) -> bool {
    GRANTABLE_SPECIALS.contains(&name)
}

/// Values supplied by staff; anything left `None` is drawn at random.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrantOverrides {
    pub shiny: Option<bool>,
    pub attack_bonus: Option<i32>,
    pub health_bonus: Option<i32>,
}

/// Fully resolved per-copy attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantRolls {
    pub shiny: bool,
    pub attack_bonus: i32,
    pub health_bonus: i32,
}

impl GrantOverrides {
    /// Fills every missing attribute with an independent random draw.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> GrantRolls {
        GrantRolls {
            shiny: self
                .shiny
                .unwrap_or_else(|| rng.gen_range(1..=SHINY_ODDS) == 1),
            attack_bonus: self
                .attack_bonus
                .unwrap_or_else(|| rng.gen_range(BONUS_RANGE)),
            health_bonus: self
                .health_bonus
                .unwrap_or_else(|| rng.gen_range(BONUS_RANGE)),
        }
    }
}

/// Creates one instance of `ball_id` owned by the player behind `discord_id`,
/// creating that player first if needed.
#[instrument(skip(db))]
pub async fn grant_instance(
    db: &DatabaseConnection,
    ball_id: i64,
    discord_id: i64,
    special_id: Option<i64>,
    rolls: GrantRolls,
) -> Result<ball_instance::Model> {
    let (owner, _) = player::get_or_create_player(db, discord_id).await?;

    let instance = ball_instance::ActiveModel {
        ball_id: Set(ball_id),
        player_id: Set(owner.id),
        shiny: Set(rolls.shiny),
        attack_bonus: Set(rolls.attack_bonus),
        health_bonus: Set(rolls.health_bonus),
        special_id: Set(special_id),
        catch_date: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(instance)
}

/// Why a give request was refused before anything was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantRefusal {
    /// The collectible is not tradeable
    NotTradeable,
    /// The special is not in [`GRANTABLE_SPECIALS`]
    SpecialNotGrantable,
}

impl GrantRefusal {
    /// Reply shown to staff.
    #[must_use]
    pub fn message(self, collectible_name: &str) -> String {
        match self {
            Self::NotTradeable => not_tradeable_message("give", collectible_name),
            Self::SpecialNotGrantable => SPECIAL_NOT_GRANTABLE.to_string(),
        }
    }
}

/// Result of a give request.
#[derive(Debug, Clone, PartialEq)]
pub enum GrantOutcome {
    /// Nothing was written
    Refused(GrantRefusal),
    /// The new instance
    Granted(ball_instance::Model),
}

/// Checks whether `ball` may be given with `special` attached.
#[must_use]
pub fn check_grant(ball: &ball::Model, special: Option<&special::Model>) -> Option<GrantRefusal> {
    if !ball.tradeable {
        return Some(GrantRefusal::NotTradeable);
    }
    if special.is_some_and(|s| !is_grantable_special(&s.name)) {
        return Some(GrantRefusal::SpecialNotGrantable);
    }
    None
}

/// Gives one `ball` to the player behind `discord_id` unless [`check_grant`] refuses.
#[instrument(skip(db, ball, special), fields(ball = %ball.country))]
pub async fn give(
    db: &DatabaseConnection,
    ball: &ball::Model,
    discord_id: i64,
    special: Option<&special::Model>,
    rolls: GrantRolls,
) -> Result<GrantOutcome> {
    if let Some(refusal) = check_grant(ball, special) {
        return Ok(GrantOutcome::Refused(refusal));
    }

    let instance = grant_instance(db, ball.id, discord_id, special.map(|s| s.id), rolls).await?;
    Ok(GrantOutcome::Granted(instance))
}

/// Criteria for counting instances. Absent criteria do not restrict the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceFilter {
    /// Owner's Discord id
    pub player_discord_id: Option<i64>,
    pub ball_id: Option<i64>,
    pub shiny: Option<bool>,
    pub special_id: Option<i64>,
    /// Only instances whose collectible is enabled
    pub enabled_balls_only: bool,
}

impl InstanceFilter {
    fn query(&self) -> Select<BallInstance> {
        let mut query = BallInstance::find();
        if let Some(ball_id) = self.ball_id {
            query = query.filter(ball_instance::Column::BallId.eq(ball_id));
        }
        if let Some(shiny) = self.shiny {
            query = query.filter(ball_instance::Column::Shiny.eq(shiny));
        }
        if let Some(special_id) = self.special_id {
            query = query.filter(ball_instance::Column::SpecialId.eq(special_id));
        }
        if let Some(discord_id) = self.player_discord_id {
            query = query
                .inner_join(Player)
                .filter(player_entity::Column::DiscordId.eq(discord_id));
        }
        if self.enabled_balls_only {
            query = query
                .inner_join(Ball)
                .filter(ball::Column::Enabled.eq(true));
        }
        query
    }
}

/// Number of instances matching `filter`; with no criteria, the whole population.
pub async fn count_instances<C>(db: &C, filter: &InstanceFilter) -> Result<u64>
where
    C: ConnectionTrait,
{
    filter.query().count(db).await.map_err(Into::into)
}

/// Distinct collectible ids among the instances matching `filter`.
pub async fn owned_ball_ids<C>(db: &C, filter: &InstanceFilter) -> Result<BTreeSet<i64>>
where
    C: ConnectionTrait,
{
    let ids: Vec<i64> = filter
        .query()
        .select_only()
        .column(ball_instance::Column::BallId)
        .distinct()
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids.into_iter().collect())
}

/// Reply sent to staff after a successful grant.
#[must_use]
pub fn grant_confirmation(
    country: &str,
    collectible_name: &str,
    recipient: &str,
    special_name: Option<&str>,
    instance: &ball_instance::Model,
) -> String {
    format!(
        "`{country}` {collectible_name} was successfully given to `{recipient}`.\n\
         Special: `{}` • ATK: `{}` • HP:`{}` • Shiny: `{}`",
        special_name.unwrap_or("None"),
        signed(instance.attack_bonus),
        signed(instance.health_bonus),
        bool_label(instance.shiny),
    )
}

/// Audit line recorded after a successful grant.
#[must_use]
pub fn grant_audit_line(
    invoker: &str,
    collectible_name: &str,
    country: &str,
    recipient: &str,
    special_name: Option<&str>,
    instance: &ball_instance::Model,
) -> String {
    format!(
        "{invoker} gave {collectible_name} {country} to {recipient}. \
         (Special={} ATK={} HP={} shiny={}).",
        special_name.unwrap_or("None"),
        signed(instance.attack_bonus),
        signed(instance.health_bonus),
        bool_label(instance.shiny),
    )
}

/// What a count sentence mentions besides the number.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountLabels<'a> {
    /// Owner, switches the sentence to "<user> has N ..."
    pub user: Option<&'a str>,
    pub country: Option<&'a str>,
    pub special: Option<&'a str>,
    pub shiny: bool,
}

/// Sentence reporting an instance count, e.g. `There are 3 Gold shiny France countryballs.`
#[must_use]
pub fn count_sentence(count: u64, labels: &CountLabels<'_>, collectible_name: &str) -> String {
    let special = labels
        .special
        .map_or_else(String::new, |name| format!("{name} "));
    let shiny = if labels.shiny { "shiny " } else { "" };
    let country = labels
        .country
        .map_or_else(String::new, |name| format!("{name} "));
    let plural = plural_suffix(count);
    let subject = labels
        .user
        .map_or_else(|| "There are".to_string(), |user| format!("{user} has"));

    format!("{subject} {count} {special}{shiny}{country}{collectible_name}{plural}.")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_ball, create_test_special, setup_test_db};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_grantable_specials() {
        assert_eq!(GRANTABLE_SPECIALS.len(), 15);
        assert!(is_grantable_special("Titanium White"));
        assert!(is_grantable_special("Burnt Sienna"));
        assert!(!is_grantable_special("titanium white"));
        assert!(!is_grantable_special("Halloween"));
        assert!(!is_grantable_special(""));
    }

    #[test]
    fn test_overrides_are_used_verbatim() {
        let mut rng = StdRng::seed_from_u64(7);
        let overrides = GrantOverrides {
            shiny: Some(true),
            attack_bonus: Some(95),
            health_bonus: Some(-300),
        };

        let rolls = overrides.resolve(&mut rng);
        assert!(rolls.shiny);
        assert_eq!(rolls.attack_bonus, 95);
        assert_eq!(rolls.health_bonus, -300);
    }

    #[test]
    fn test_random_bonuses_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen_min = false;
        let mut seen_max = false;

        for _ in 0..5_000 {
            let rolls = GrantOverrides::default().resolve(&mut rng);
            assert!(BONUS_RANGE.contains(&rolls.attack_bonus));
            assert!(BONUS_RANGE.contains(&rolls.health_bonus));
            seen_min |= rolls.attack_bonus == -20;
            seen_max |= rolls.attack_bonus == 20;
        }

        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_random_shiny_rate() {
        let mut rng = StdRng::seed_from_u64(2048);
        let draws = SHINY_ODDS * 50;

        let shiny = (0..draws)
            .filter(|_| GrantOverrides::default().resolve(&mut rng).shiny)
            .count();

        // Expect about 50; the bounds are several standard deviations wide
        assert!((20..=90).contains(&shiny), "got {shiny} shiny draws");
    }

    #[tokio::test]
    async fn test_grant_instance_creates_player_and_instance() -> Result<()> {
        let db = setup_test_db().await?;
        let france = create_test_ball(&db, "France", 2.0).await?;
        let gold = create_test_special(&db, "Gold").await?;

        let rolls = GrantRolls {
            shiny: false,
            attack_bonus: -4,
            health_bonus: 17,
        };
        let instance = grant_instance(&db, france.id, 1234, Some(gold.id), rolls).await?;

        let owner = player::get_player(&db, 1234).await?.unwrap();
        assert_eq!(instance.player_id, owner.id);
        assert_eq!(instance.ball_id, france.id);
        assert_eq!(instance.special_id, Some(gold.id));
        assert_eq!(instance.attack_bonus, -4);
        assert_eq!(instance.health_bonus, 17);
        assert!(!instance.shiny);

        Ok(())
    }

    #[tokio::test]
    async fn test_count_instances_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let france = create_test_ball(&db, "France", 2.0).await?;
        let spain = create_test_ball(&db, "Spain", 3.0).await?;
        let gold = create_test_special(&db, "Gold").await?;

        let plain = GrantRolls {
            shiny: false,
            attack_bonus: 0,
            health_bonus: 0,
        };
        let shiny = GrantRolls {
            shiny: true,
            ..plain
        };

        grant_instance(&db, france.id, 1, None, plain).await?;
        grant_instance(&db, france.id, 1, Some(gold.id), shiny).await?;
        grant_instance(&db, spain.id, 1, None, plain).await?;
        grant_instance(&db, spain.id, 2, None, shiny).await?;

        let everything = InstanceFilter::default();
        assert_eq!(count_instances(&db, &everything).await?, 4);

        let first_player = InstanceFilter {
            player_discord_id: Some(1),
            ..Default::default()
        };
        assert_eq!(count_instances(&db, &first_player).await?, 3);

        let nobody = InstanceFilter {
            player_discord_id: Some(99),
            ..Default::default()
        };
        assert_eq!(count_instances(&db, &nobody).await?, 0);

        let shiny_spain = InstanceFilter {
            ball_id: Some(spain.id),
            shiny: Some(true),
            ..Default::default()
        };
        assert_eq!(count_instances(&db, &shiny_spain).await?, 1);

        let gold_for_first = InstanceFilter {
            player_discord_id: Some(1),
            special_id: Some(gold.id),
            ..Default::default()
        };
        assert_eq!(count_instances(&db, &gold_for_first).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_give_refuses_special_outside_allow_list() -> Result<()> {
        let db = setup_test_db().await?;
        let france = create_test_ball(&db, "France", 2.0).await?;
        let halloween = create_test_special(&db, "Halloween").await?;
        let gold = create_test_special(&db, "Gold").await?;
        let rolls = GrantRolls {
            shiny: false,
            attack_bonus: 0,
            health_bonus: 0,
        };

        let outcome = give(&db, &france, 1, Some(&halloween), rolls).await?;
        assert_eq!(
            outcome,
            GrantOutcome::Refused(GrantRefusal::SpecialNotGrantable)
        );
        assert_eq!(count_instances(&db, &InstanceFilter::default()).await?, 0);
        assert!(player::get_player(&db, 1).await?.is_none());

        let outcome = give(&db, &france, 1, Some(&gold), rolls).await?;
        assert!(matches!(outcome, GrantOutcome::Granted(ref i) if i.special_id == Some(gold.id)));
        assert_eq!(count_instances(&db, &InstanceFilter::default()).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_give_refuses_untradeable_collectible() -> Result<()> {
        let db = setup_test_db().await?;
        let mut vatican = create_test_ball(&db, "Vatican", 0.2).await?;
        vatican.tradeable = false;

        let rolls = GrantOverrides::default().resolve(&mut StdRng::seed_from_u64(1));
        let outcome = give(&db, &vatican, 1, None, rolls).await?;

        assert_eq!(outcome, GrantOutcome::Refused(GrantRefusal::NotTradeable));
        assert_eq!(
            GrantRefusal::NotTradeable.message("countryball"),
            "You do not have permission to give this countryball"
        );
        assert_eq!(count_instances(&db, &InstanceFilter::default()).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_count_instances_of_ended_special() -> Result<()> {
        let db = setup_test_db().await?;
        let france = create_test_ball(&db, "France", 2.0).await?;
        let christmas = create_test_special(&db, "Christmas").await?;
        let mut ended: special::ActiveModel = christmas.clone().into();
        ended.end_date = Set(Some(Utc::now() - chrono::Duration::days(30)));
        let christmas = ended.update(&db).await?;
        assert!(!christmas.is_active(Utc::now()));

        let rolls = GrantRolls {
            shiny: false,
            attack_bonus: 0,
            health_bonus: 0,
        };
        grant_instance(&db, france.id, 1, Some(christmas.id), rolls).await?;

        let catalog = crate::core::catalog::load_catalog(&db).await?;
        let found = catalog.find_special_at("Christmas", None).unwrap();
        let filter = InstanceFilter {
            special_id: Some(found.id),
            ..Default::default()
        };
        assert_eq!(count_instances(&db, &filter).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_owned_ball_ids_respects_enabled_flag() -> Result<()> {
        let db = setup_test_db().await?;
        let france = create_test_ball(&db, "France", 2.0).await?;
        let spain = create_test_ball(&db, "Spain", 3.0).await?;

        let mut spain_model: ball::ActiveModel = spain.clone().into();
        spain_model.enabled = Set(false);
        spain_model.update(&db).await?;

        let rolls = GrantRolls {
            shiny: false,
            attack_bonus: 0,
            health_bonus: 0,
        };
        grant_instance(&db, france.id, 1, None, rolls).await?;
        grant_instance(&db, france.id, 2, None, rolls).await?;
        grant_instance(&db, spain.id, 1, None, rolls).await?;

        let all = owned_ball_ids(&db, &InstanceFilter::default()).await?;
        assert_eq!(all, BTreeSet::from([france.id, spain.id]));

        let enabled_only = InstanceFilter {
            enabled_balls_only: true,
            ..Default::default()
        };
        let owned = owned_ball_ids(&db, &enabled_only).await?;
        assert_eq!(owned, BTreeSet::from([france.id]));

        Ok(())
    }

    fn sample_instance(shiny: bool, attack_bonus: i32, health_bonus: i32) -> ball_instance::Model {
        ball_instance::Model {
            id: 1,
            ball_id: 1,
            player_id: 1,
            shiny,
            attack_bonus,
            health_bonus,
            special_id: None,
            catch_date: Utc::now(),
        }
    }

    #[test]
    fn test_grant_messages() {
        let instance = sample_instance(false, 5, -3);

        assert_eq!(
            grant_confirmation("France", "countryball", "alice", None, &instance),
            "`France` countryball was successfully given to `alice`.\n\
             Special: `None` • ATK: `+5` • HP:`-3` • Shiny: `False`"
        );
        assert_eq!(
            grant_audit_line("bob", "countryball", "France", "alice", Some("Gold"), &instance),
            "bob gave countryball France to alice. (Special=Gold ATK=+5 HP=-3 shiny=False)."
        );
    }

    #[test]
    fn test_count_sentence_pluralization() {
        let labels = CountLabels::default();
        assert_eq!(
            count_sentence(0, &labels, "countryball"),
            "There are 0 countryballs."
        );
        assert_eq!(
            count_sentence(1, &labels, "countryball"),
            "There are 1 countryball."
        );
        assert_eq!(
            count_sentence(2, &labels, "countryball"),
            "There are 2 countryballs."
        );
    }

    #[test]
    fn test_count_sentence_labels() {
        let labels = CountLabels {
            user: Some("alice"),
            country: Some("France"),
            special: Some("Gold"),
            shiny: true,
        };
        assert_eq!(
            count_sentence(3, &labels, "countryball"),
            "alice has 3 Gold shiny France countryballs."
        );
    }
}
