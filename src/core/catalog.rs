//! In-memory collectible catalog.
//!
//! The catalog is read from the database once at startup and never mutated
//! afterwards; handlers share it through an `Arc` in the bot data.

use crate::{
    entities::{Ball, Special, ball, special},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::prelude::*;
use std::collections::BTreeMap;

/// Discord caps autocomplete suggestions at 25
pub const AUTOCOMPLETE_LIMIT: usize = 25;

/// Immutable maps of collectible and special definitions, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    balls: BTreeMap<i64, ball::Model>,
    specials: BTreeMap<i64, special::Model>,
}

impl Catalog {
    /// Builds a catalog from already-loaded rows.
    #[must_use]
    pub fn new(balls: Vec<ball::Model>, specials: Vec<special::Model>) -> Self {
        Self {
            balls: balls.into_iter().map(|b| (b.id, b)).collect(),
            specials: specials.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn balls(&self) -> impl Iterator<Item = &ball::Model> {
        self.balls.values()
    }

    pub fn specials(&self) -> impl Iterator<Item = &special::Model> {
        self.specials.values()
    }

    #[must_use]
    pub fn ball(&self, id: i64) -> Option<&ball::Model> {
        self.balls.get(&id)
    }

    #[must_use]
    pub fn special(&self, id: i64) -> Option<&special::Model> {
        self.specials.get(&id)
    }

    /// Enabled collectibles sorted ascending by rarity. Ties keep id order.
    #[must_use]
    pub fn enabled_by_rarity(&self) -> Vec<&ball::Model> {
        let mut enabled: Vec<&ball::Model> = self.balls.values().filter(|b| b.enabled).collect();
        enabled.sort_by(|a, b| a.rarity.total_cmp(&b.rarity));
        enabled
    }

    /// Looks a collectible up by numeric id or case-insensitive name.
    #[must_use]
    pub fn find_ball(&self, query: &str) -> Option<&ball::Model> {
        let query = query.trim();
        if let Ok(id) = query.parse::<i64>() {
            if let Some(found) = self.balls.get(&id) {
                return Some(found);
            }
        }
        self.balls
            .values()
            .find(|b| b.country.eq_ignore_ascii_case(query))
    }

    /// Looks a special up by numeric id or case-insensitive name.
    #[must_use]
    pub fn find_special(&self, query: &str) -> Option<&special::Model> {
        let query = query.trim();
        if let Ok(id) = query.parse::<i64>() {
            if let Some(found) = self.specials.get(&id) {
                return Some(found);
            }
        }
        self.specials
            .values()
            .find(|s| s.name.eq_ignore_ascii_case(query))
    }

    /// Like [`Catalog::find_special`]; with `active_at`, only a special active then matches.
    #[must_use]
    pub fn find_special_at(
        &self,
        query: &str,
        active_at: Option<DateTime<Utc>>,
    ) -> Option<&special::Model> {
        self.find_special(query)
            .filter(|s| active_at.is_none_or(|now| s.is_active(now)))
    }

    /// Collectible names containing `partial`, for autocomplete.
    #[must_use]
    pub fn search_balls(&self, partial: &str) -> Vec<String> {
        let partial_lower = partial.to_lowercase();
        let mut matching: Vec<String> = self
            .balls
            .values()
            .filter(|b| b.country.to_lowercase().contains(&partial_lower))
            .map(|b| b.country.clone())
            .take(AUTOCOMPLETE_LIMIT)
            .collect();
        matching.sort();
        matching
    }

    /// Special names containing `partial`; with `active_at`, only specials active then.
    #[must_use]
    pub fn search_specials(&self, partial: &str, active_at: Option<DateTime<Utc>>) -> Vec<String> {
        let partial_lower = partial.to_lowercase();
        let mut matching: Vec<String> = self
            .specials
            .values()
            .filter(|s| active_at.is_none_or(|now| s.is_active(now)))
            .filter(|s| s.name.to_lowercase().contains(&partial_lower))
            .map(|s| s.name.clone())
            .take(AUTOCOMPLETE_LIMIT)
            .collect();
        matching.sort();
        matching
    }
}

/// Reads every collectible and special from the database into a [`Catalog`].
pub async fn load_catalog(db: &DatabaseConnection) -> Result<Catalog> {
    let balls = Ball::find().all(db).await?;
    let specials = Special::find().all(db).await?;
    tracing::info!(
        "Loaded catalog with {} collectibles and {} specials",
        balls.len(),
        specials.len()
    );
    Ok(Catalog::new(balls, specials))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_ball, create_test_special, setup_test_db, test_ball};

    #[test]
    fn test_enabled_by_rarity_sorts_and_filters() {
        let mut disabled = test_ball(3, "Atlantis", 0.5);
        disabled.enabled = false;
        let catalog = Catalog::new(
            vec![
                test_ball(1, "France", 10.0),
                test_ball(2, "Spain", 1.5),
                disabled,
                test_ball(4, "Italy", 4.0),
            ],
            Vec::new(),
        );

        let names: Vec<&str> = catalog
            .enabled_by_rarity()
            .iter()
            .map(|b| b.country.as_str())
            .collect();
        assert_eq!(names, vec!["Spain", "Italy", "France"]);
    }

    #[test]
    fn test_find_ball_by_id_or_name() {
        let catalog = Catalog::new(vec![test_ball(7, "France", 1.0)], Vec::new());

        assert_eq!(catalog.find_ball("7").unwrap().country, "France");
        assert_eq!(catalog.find_ball("france").unwrap().id, 7);
        assert_eq!(catalog.find_ball(" FRANCE ").unwrap().id, 7);
        assert!(catalog.find_ball("Spain").is_none());
    }

    #[test]
    fn test_search_balls_limits_and_sorts() {
        let balls = (0..40)
            .map(|i| test_ball(i, &format!("Land {i:02}"), 1.0))
            .collect();
        let catalog = Catalog::new(balls, Vec::new());

        let results = catalog.search_balls("land");
        assert_eq!(results.len(), AUTOCOMPLETE_LIMIT);
        assert!(results.windows(2).all(|w| w[0] <= w[1]));
        assert!(catalog.search_balls("zzz").is_empty());
    }

    #[test]
    fn test_find_special_at_ended_event() {
        let christmas = special::Model {
            id: 3,
            name: "Christmas".to_string(),
            emoji: None,
            start_date: None,
            end_date: Some(Utc::now() - chrono::Duration::days(30)),
            hidden: false,
        };
        let catalog = Catalog::new(Vec::new(), vec![christmas]);

        assert_eq!(catalog.find_special_at("Christmas", None).unwrap().id, 3);
        assert!(catalog.find_special_at("Christmas", Some(Utc::now())).is_none());
        assert!(catalog.search_specials("chr", Some(Utc::now())).is_empty());
        assert_eq!(catalog.search_specials("chr", None), vec!["Christmas"]);
    }

    #[tokio::test]
    async fn test_load_catalog() -> Result<()> {
        let db = setup_test_db().await?;
        let france = create_test_ball(&db, "France", 2.0).await?;
        let gold = create_test_special(&db, "Gold").await?;

        let catalog = load_catalog(&db).await?;
        assert_eq!(catalog.ball(france.id).unwrap().country, "France");
        assert_eq!(catalog.special(gold.id).unwrap().name, "Gold");
        assert_eq!(catalog.find_special("gold").unwrap().id, gold.id);
        assert_eq!(catalog.search_specials("", Some(Utc::now())), vec!["Gold"]);

        Ok(())
    }
}
