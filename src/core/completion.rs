//! Dex completion - which enabled collectibles exist among instances and which are missing.

use crate::{
    core::{
        catalog::Catalog,
        format::format_float,
        instance::{InstanceFilter, owned_ball_ids},
        listing::{Entry, qualifiers},
    },
    entities::special,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, BTreeSet};

/// Discord's limit on an embed field body
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Title used for continuation fields
pub const ZERO_WIDTH_SPACE: &str = "\u{200B}";

/// Progression summary ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Existing/missing emoji fields
    pub entries: Vec<Entry>,
    /// Collectibles of the dex that have at least one matching instance
    pub owned: usize,
    /// Size of the dex
    pub total: usize,
}

impl Completion {
    /// Owned share of the dex in percent, rounded to one decimal.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // dex sizes are tiny
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.owned as f64 / self.total as f64 * 1000.0).round() / 10.0
    }
}

/// The collectibles that count towards completion, id to emoji id.
///
/// Disabled collectibles never count. With a special, only collectibles created
/// before the special ended count.
#[must_use]
pub fn dex_for(catalog: &Catalog, special: Option<&special::Model>) -> BTreeMap<i64, i64> {
    catalog
        .balls()
        .filter(|ball| ball.enabled)
        .filter(|ball| {
            special
                .and_then(|s| s.end_date)
                .is_none_or(|end| ball.created_at < end)
        })
        .map(|ball| (ball.id, ball.emoji_id))
        .collect()
}

/// Appends emoji fields under `title`, starting a new field whenever the next emoji
/// would push the body past [`FIELD_VALUE_LIMIT`]. Continuation fields get a blank title.
pub fn fill_fields(entries: &mut Vec<Entry>, title: &str, emojis: &[String]) {
    let mut first_field_added = false;
    let mut buffer = String::new();

    let mut push = |entries: &mut Vec<Entry>, buffer: String| {
        if first_field_added {
            entries.push((ZERO_WIDTH_SPACE.to_string(), buffer));
        } else {
            entries.push((format!("__**{title}**__"), buffer));
            first_field_added = true;
        }
    };

    for emoji in emojis {
        let text = format!("{emoji} ");
        if !buffer.is_empty() && buffer.len() + text.len() > FIELD_VALUE_LIMIT {
            push(entries, std::mem::take(&mut buffer));
        }
        buffer.push_str(&text);
    }

    if !buffer.is_empty() {
        push(entries, buffer);
    }
}

/// Builds the existing/missing breakdown for `dex` given the `owned` collectible ids.
/// Emojis that cannot be resolved are left out of the fields.
pub fn completion_entries<F>(
    dex: &BTreeMap<i64, i64>,
    owned: &BTreeSet<i64>,
    plural_collectible_name: &str,
    resolve_emoji: F,
) -> Completion
where
    F: Fn(i64) -> Option<String>,
{
    let mut entries = Vec::new();
    let owned_in_dex: Vec<i64> = dex
        .keys()
        .copied()
        .filter(|id| owned.contains(id))
        .collect();

    let emojis_for = |ids: &[i64]| -> Vec<String> {
        ids.iter()
            .filter_map(|id| dex.get(id).and_then(|emoji_id| resolve_emoji(*emoji_id)))
            .collect()
    };

    if owned_in_dex.is_empty() {
        entries.push((
            format!("__**Existing {plural_collectible_name}**__"),
            "Nothing yet.".to_string(),
        ));
    } else {
        let existing = emojis_for(&owned_in_dex);
        fill_fields(
            &mut entries,
            &format!("Existing {plural_collectible_name}"),
            &existing,
        );
    }

    let missing: Vec<i64> = dex.keys().copied().filter(|id| !owned.contains(id)).collect();
    if missing.is_empty() {
        entries.push((
            format!(
                "__**:tada: No missing {plural_collectible_name}, congratulations! :tada:**__"
            ),
            ZERO_WIDTH_SPACE.to_string(),
        ));
    } else {
        let missing_emojis = emojis_for(&missing);
        fill_fields(
            &mut entries,
            &format!("Missing {plural_collectible_name}"),
            &missing_emojis,
        );
    }

    Completion {
        entries,
        owned: owned_in_dex.len(),
        total: dex.len(),
    }
}

/// Computes completion over every instance in the game.
///
/// Returns `None` when the dex is empty for the requested special.
pub async fn global_completion<F>(
    db: &DatabaseConnection,
    catalog: &Catalog,
    special: Option<&special::Model>,
    shiny: Option<bool>,
    plural_collectible_name: &str,
    resolve_emoji: F,
) -> Result<Option<Completion>>
where
    F: Fn(i64) -> Option<String>,
{
    let dex = dex_for(catalog, special);
    if dex.is_empty() {
        return Ok(None);
    }

    let filter = InstanceFilter {
        shiny,
        special_id: special.map(|s| s.id),
        enabled_balls_only: true,
        ..Default::default()
    };
    let owned = owned_ball_ids(db, &filter).await?;

    Ok(Some(completion_entries(
        &dex,
        &owned,
        plural_collectible_name,
        resolve_emoji,
    )))
}

/// Embed description, e.g. `BallsDex (Gold) shiny progression: **42.5%**`.
#[must_use]
pub fn completion_description(
    bot_name: &str,
    special: Option<&str>,
    shiny: bool,
    completion: &Completion,
) -> String {
    format!(
        "{bot_name}{} progression: **{}%**",
        qualifiers(special, shiny),
        format_float(completion.percent())
    )
}

/// Reply when no collectible counts towards completion.
#[must_use]
pub fn empty_dex_message(
    special: Option<&str>,
    shiny: bool,
    plural_collectible_name: &str,
) -> String {
    let shiny = if shiny { "shiny " } else { "" };
    let special = special.map_or_else(String::new, |name| format!("{name} "));
    format!("There are no {shiny}{special}{plural_collectible_name} registered on this bot yet.")
}
