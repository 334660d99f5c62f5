//! Leaderboard listings - collectible rarities, special counts, per-collectible counts.
//!
//! Each listing is a vector of `(title, body)` entries ready for the paginated
//! embed presenter. Emoji lookup is injected so the logic stays framework-agnostic.

use crate::{
    core::{
        catalog::Catalog,
        format::format_float,
        instance::{InstanceFilter, count_instances},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// One embed field: title and body
pub type Entry = (String, String);

/// Entries shown per page in every listing
pub const ENTRIES_PER_PAGE: usize = 5;

/// Marker used when an emoji cannot be resolved
pub const NO_EMOJI: &str = "N/A";

/// Rarity leaderboard over enabled collectibles, rarest (lowest value) first.
pub fn rarity_entries<F>(catalog: &Catalog, resolve_emoji: F) -> Vec<Entry>
where
    F: Fn(i64) -> Option<String>,
{
    catalog
        .enabled_by_rarity()
        .into_iter()
        .map(|ball| {
            let emote = resolve_emoji(ball.emoji_id).unwrap_or_else(|| NO_EMOJI.to_string());
            (
                ball.country.clone(),
                format!("{emote} Rarity: {}", format_float(ball.rarity)),
            )
        })
        .collect()
}

/// Every registered special with the live number of instances carrying it.
pub async fn special_rarity_entries(db: &DatabaseConnection, catalog: &Catalog) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for special in catalog.specials() {
        let emote = special
            .emoji
            .as_deref()
            .filter(|emoji| !emoji.is_empty())
            .unwrap_or(NO_EMOJI);
        let filter = InstanceFilter {
            special_id: Some(special.id),
            ..Default::default()
        };
        let count = count_instances(db, &filter).await?;

        entries.push((special.name.clone(), format!("{emote} Count: {count}")));
    }

    Ok(entries)
}

/// Per-collectible instance counts, by ascending rarity, skipping zero counts.
///
/// `filter.ball_id` is ignored; every enabled collectible is counted in turn.
pub async fn count_list_entries<F>(
    db: &DatabaseConnection,
    catalog: &Catalog,
    filter: &InstanceFilter,
    resolve_emoji: F,
) -> Result<Vec<Entry>>
where
    F: Fn(i64) -> Option<String>,
{
    let mut entries = Vec::new();

    for ball in catalog.enabled_by_rarity() {
        let ball_filter = InstanceFilter {
            ball_id: Some(ball.id),
            ..*filter
        };
        let count = count_instances(db, &ball_filter).await?;
        if count == 0 {
            continue;
        }

        let emote = resolve_emoji(ball.emoji_id).unwrap_or_else(|| NO_EMOJI.to_string());
        entries.push((ball.country.clone(), format!("{emote} Count: {count}")));
    }

    Ok(entries)
}

/// What a count list request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountList {
    /// No enabled collectible exists at all
    NoCollectibles,
    /// Collectibles exist but no instance matched
    Nothing,
    Entries(Vec<Entry>),
}

/// [`count_list_entries`], telling an empty catalog apart from an empty result.
pub async fn count_list<F>(
    db: &DatabaseConnection,
    catalog: &Catalog,
    filter: &InstanceFilter,
    resolve_emoji: F,
) -> Result<CountList>
where
    F: Fn(i64) -> Option<String>,
{
    if catalog.enabled_by_rarity().is_empty() {
        return Ok(CountList::NoCollectibles);
    }

    let entries = count_list_entries(db, catalog, filter, resolve_emoji).await?;
    if entries.is_empty() {
        Ok(CountList::Nothing)
    } else {
        Ok(CountList::Entries(entries))
    }
}

/// Description above the rarity pages.
#[must_use]
pub fn rarity_title(bot_name: &str) -> String {
    format!("__**{bot_name} rarity**__")
}

/// Description above the special rarity pages.
#[must_use]
pub fn special_rarity_title(bot_name: &str) -> String {
    format!("__**{bot_name} events rarity**__")
}

/// Description above the count list pages.
#[must_use]
pub fn count_list_title(bot_name: &str, special: Option<&str>, shiny: bool) -> String {
    format!("__**{bot_name}{} count**__", qualifiers(special, shiny))
}

/// Reply when the enabled catalog is empty.
#[must_use]
pub fn no_collectibles_message(bot_name: &str) -> String {
    format!("There are no collectibles registered in {bot_name} yet.")
}

/// Reply when no special is registered.
#[must_use]
pub fn no_events_message(bot_name: &str) -> String {
    format!("There are no events registered in {bot_name} yet.")
}

/// Reply when the count list came back empty.
#[must_use]
pub fn empty_count_list_message(
    user: Option<&str>,
    special: Option<&str>,
    shiny: bool,
    plural_collectible_name: &str,
) -> String {
    let qualifiers = qualifiers(special, shiny);
    user.map_or_else(
        || format!("There are no{qualifiers} {plural_collectible_name} yet."),
        |user| format!("{user} has no{qualifiers} {plural_collectible_name} yet."),
    )
}

/// ` (Special)` and ` shiny` suffixes, each only when set.
pub(crate) fn qualifiers(special: Option<&str>, shiny: bool) -> String {
    let special = special.map_or_else(String::new, |name| format!(" ({name})"));
    let shiny = if shiny { " shiny" } else { "" };
    format!("{special}{shiny}")
}
