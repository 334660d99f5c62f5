//! Special entity - a variant (event or paint) that can be attached to an instance.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Special database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "specials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, also used by the grant allow-list
    #[sea_orm(unique)]
    pub name: String,
    /// Emoji rendered next to the name, unicode or `<:name:id>`
    pub emoji: Option<String>,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    /// Hidden specials are never offered as active
    pub hidden: bool,
}

impl Model {
    /// Whether the special is visible and `now` falls inside its window.
    /// Missing bounds are treated as open.
    #[must_use]
    pub fn is_active(&self, now: DateTimeUtc) -> bool {
        !self.hidden
            && self.start_date.is_none_or(|start| start <= now)
            && self.end_date.is_none_or(|end| now <= end)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ball_instance::Entity")]
    BallInstances,
}

impl Related<super::ball_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BallInstances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
