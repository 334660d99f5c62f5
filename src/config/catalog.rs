//! Catalog seed loading from config.toml
//!
//! Collectible and special definitions declared in `config.toml` are inserted into
//! the database on startup when no row with the same name exists yet. Existing
//! rows are never modified.

use crate::entities::{Ball, Special, ball, special};
use crate::errors::Result;
use chrono::{DateTime, Utc};
use sea_orm::{Set, prelude::*};
use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// A collectible declared in `config.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct BallSeed {
    pub country: String,
    pub rarity: f64,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub tradeable: bool,
    #[serde(default)]
    pub emoji_id: i64,
}

/// A special declared in `config.toml`
///
/// Dates are RFC 3339 strings, e.g. `end_date = "2025-01-31T23:59:59Z"`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialSeed {
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hidden: bool,
}

/// Inserts the seeded collectibles and specials that are missing from the database.
///
/// # Returns
/// The number of rows inserted, collectibles and specials combined.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    balls: &[BallSeed],
    specials: &[SpecialSeed],
) -> Result<usize> {
    let mut inserted = 0;

    for seed in balls {
        let existing = Ball::find()
            .filter(ball::Column::Country.eq(seed.country.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        ball::ActiveModel {
            country: Set(seed.country.clone()),
            rarity: Set(seed.rarity),
            enabled: Set(seed.enabled),
            tradeable: Set(seed.tradeable),
            emoji_id: Set(seed.emoji_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    for seed in specials {
        let existing = Special::find()
            .filter(special::Column::Name.eq(seed.name.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        special::ActiveModel {
            name: Set(seed.name.clone()),
            emoji: Set(seed.emoji.clone()),
            start_date: Set(seed.start_date),
            end_date: Set(seed.end_date),
            hidden: Set(seed.hidden),
            ..Default::default()
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    tracing::info!("Seeded {inserted} catalog rows");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    fn ball_seed(country: &str, rarity: f64) -> BallSeed {
        BallSeed {
            country: country.to_string(),
            rarity,
            enabled: true,
            tradeable: true,
            emoji_id: 0,
        }
    }

    #[tokio::test]
    async fn test_seed_catalog_inserts_missing_only() -> Result<()> {
        let db = setup_test_db().await?;
        let balls = vec![ball_seed("France", 2.0), ball_seed("Spain", 3.0)];
        let specials = vec![SpecialSeed {
            name: "Gold".to_string(),
            emoji: Some("🟨".to_string()),
            start_date: None,
            end_date: None,
            hidden: false,
        }];

        assert_eq!(seed_catalog(&db, &balls, &specials).await?, 3);
        assert_eq!(seed_catalog(&db, &balls, &specials).await?, 0);

        assert_eq!(Ball::find().all(&db).await?.len(), 2);
        let gold = Special::find().one(&db).await?.unwrap();
        assert_eq!(gold.emoji.as_deref(), Some("🟨"));

        Ok(())
    }

    #[test]
    fn test_special_seed_dates() {
        let seed: SpecialSeed =
            toml::from_str("name = \"Winter\"\nend_date = \"2025-01-31T23:59:59Z\"").unwrap();
        assert!(seed.start_date.is_none());
        assert_eq!(seed.end_date.unwrap().to_rfc3339(), "2025-01-31T23:59:59+00:00");
    }

    #[test]
    fn test_ball_seed_defaults() {
        let seed: BallSeed = toml::from_str("country = \"Italy\"\nrarity = 4.0").unwrap();
        assert!(seed.enabled);
        assert!(seed.tradeable);
        assert_eq!(seed.emoji_id, 0);
    }
}
