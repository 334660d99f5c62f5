//! Ball instance entity - one owned copy of a collectible.
//!
//! Each instance references its `Ball` definition, its owning `Player`, and an
//! optional `Special`, along with the per-copy shiny flag and stat bonuses.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ball instance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ball_instances")]
pub struct Model {
    /// Unique identifier for the instance
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the collectible definition
    pub ball_id: i64,
    /// ID of the owning player (not the Discord id)
    pub player_id: i64,
    /// Rare cosmetic flag
    pub shiny: bool,
    /// Signed attack bonus, in percent
    pub attack_bonus: i32,
    /// Signed health bonus, in percent
    pub health_bonus: i32,
    /// Optional variant attached to this copy
    pub special_id: Option<i64>,
    /// When the instance was created
    pub catch_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each instance belongs to one collectible definition
    #[sea_orm(
        belongs_to = "super::ball::Entity",
        from = "Column::BallId",
        to = "super::ball::Column::Id"
    )]
    Ball,
    /// Each instance belongs to one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
    /// Each instance may carry one special
    #[sea_orm(
        belongs_to = "super::special::Entity",
        from = "Column::SpecialId",
        to = "super::special::Column::Id"
    )]
    Special,
}

impl Related<super::ball::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ball.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl Related<super::special::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Special.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
