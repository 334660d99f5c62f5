//! Player entity - a Discord user known to the game.
//!
//! Players are created lazily the first time a command references them and carry
//! the inventory privacy policy.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Who may look at a player's inventory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PrivacyPolicy {
    /// Anyone can view the inventory
    #[sea_orm(num_value = 1)]
    Allow,
    /// Nobody but the owner can view the inventory
    #[sea_orm(num_value = 2)]
    Deny,
    /// Only members of a shared server can view the inventory
    #[sea_orm(num_value = 3)]
    SameServer,
}

impl PrivacyPolicy {
    /// Upper-case name shown back to staff, e.g. `SAME_SERVER`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Deny => "DENY",
            Self::SameServer => "SAME_SERVER",
        }
    }
}

/// Player database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user snowflake, stored signed
    #[sea_orm(unique)]
    pub discord_id: i64,
    pub privacy_policy: PrivacyPolicy,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One player owns many instances
    #[sea_orm(has_many = "super::ball_instance::Entity")]
    BallInstances,
}

impl Related<super::ball_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BallInstances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
