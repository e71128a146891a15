//! Profile entity - Per-user display data and gamification state.
//!
//! XP only moves upward in normal operation, and `level` is always the value
//! of the level formula for the stored XP at write time. All mutations go
//! through the gamification operations, never direct field assignment.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user, one profile per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Given name shown on dashboards and leaderboards
    pub first_name: String,
    /// Family name shown on dashboards and leaderboards
    pub last_name: String,
    /// Accumulated experience points, non-negative
    pub xp: i64,
    /// Level derived from XP, always >= 1
    pub level: i32,
}

impl Model {
    /// Display name as shown on the leaderboard.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each profile belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One profile owns many badges
    #[sea_orm(has_many = "super::badge_ownership::Entity")]
    BadgeOwnerships,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::badge_ownership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BadgeOwnerships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
