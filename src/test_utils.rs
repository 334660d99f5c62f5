//! Shared test utilities.
//!
//! This module provides helpers for setting up an in-memory database and creating
//! catalog rows with sensible defaults.

use crate::{
    entities::{ball, special},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds an enabled, tradeable collectible model without touching the database.
#[must_use]
pub fn test_ball(id: i64, country: &str, rarity: f64) -> ball::Model {
    ball::Model {
        id,
        country: country.to_string(),
        rarity,
        enabled: true,
        tradeable: true,
        emoji_id: 0,
        created_at: Utc::now(),
    }
}

/// Inserts an enabled, tradeable collectible.
///
/// # Defaults
/// * `emoji_id`: 0
pub async fn create_test_ball(
    db: &DatabaseConnection,
    country: &str,
    rarity: f64,
) -> Result<ball::Model> {
    ball::ActiveModel {
        country: Set(country.to_string()),
        rarity: Set(rarity),
        enabled: Set(true),
        tradeable: Set(true),
        emoji_id: Set(0),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts an always-active special with a yellow square emoji.
pub async fn create_test_special(db: &DatabaseConnection, name: &str) -> Result<special::Model> {
    special::ActiveModel {
        name: Set(name.to_string()),
        emoji: Set(Some("🟨".to_string())),
        start_date: Set(None),
        end_date: Set(None),
        hidden: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
