//! BadgeOwnership entity - Join table between profiles and badges.
//!
//! The composite primary key `(profile_id, badge_id)` enforces the
//! at-most-once award constraint in the schema itself: a given badge can be
//! awarded to a given profile exactly once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// BadgeOwnership database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "badge_ownerships")]
pub struct Model {
    /// Profile that earned the badge
    #[sea_orm(primary_key, auto_increment = false)]
    pub profile_id: i64,
    /// Badge that was earned
    #[sea_orm(primary_key, auto_increment = false)]
    pub badge_id: i64,
    /// When the badge was awarded
    pub earned_at: DateTimeUtc,
}

/// Defines relationships between BadgeOwnership and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ownership row belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    /// Each ownership row references one catalog badge
    #[sea_orm(
        belongs_to = "super::badge::Entity",
        from = "Column::BadgeId",
        to = "super::badge::Column::Id"
    )]
    Badge,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Badge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
