//! Badge entity - The admin-managed achievement catalog.
//!
//! Badges are global, not owned by any user. `xp_value` is granted to a
//! profile exactly once, on first award.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Badge database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "badges")]
pub struct Model {
    /// Unique identifier for the badge
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across the catalog
    #[sea_orm(unique)]
    pub name: String,
    /// Short description shown alongside the badge
    pub description: String,
    /// Icon identifier used by the dashboard (e.g. an emoji or asset key)
    pub icon: String,
    /// XP granted to a profile on first award
    pub xp_value: i64,
}

/// Defines relationships between Badge and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One badge can be owned by many profiles
    #[sea_orm(has_many = "super::badge_ownership::Entity")]
    BadgeOwnerships,
}

impl Related<super::badge_ownership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BadgeOwnerships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
