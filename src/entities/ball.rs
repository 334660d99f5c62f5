//! Ball entity - the static definition of a collectible species.
//!
//! Rows are seeded from `config.toml` and read once into the in-memory catalog.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ball database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "balls")]
pub struct Model {
    /// Unique identifier for the collectible
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (the "country")
    #[sea_orm(unique)]
    pub country: String,
    /// Spawn weight; listings sort ascending on it
    pub rarity: f64,
    /// Disabled collectibles are hidden from listings and never spawn at random
    pub enabled: bool,
    /// Staff may only spawn or give tradeable collectibles
    pub tradeable: bool,
    /// Discord custom emoji id
    pub emoji_id: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One collectible has many owned instances
    #[sea_orm(has_many = "super::ball_instance::Entity")]
    BallInstances,
}

impl Related<super::ball_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BallInstances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
