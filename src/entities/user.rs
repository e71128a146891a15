//! User entity - Represents an account on the platform.
//!
//! Every user belongs to a school and carries a role. The role decides which
//! satellite rows exist: every user gets a profile, STUDENT and PARENT
//! accounts additionally get a wallet.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role, stored as a closed string enum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    /// Platform administrator
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    /// Teaching staff
    #[sea_orm(string_value = "TEACHER")]
    Teacher,
    /// Enrolled student
    #[sea_orm(string_value = "STUDENT")]
    Student,
    /// Parent or guardian of a student
    #[sea_orm(string_value = "PARENT")]
    Parent,
}

impl UserRole {
    /// Whether accounts with this role are provisioned with a wallet.
    /// Only students and parents hold token balances.
    #[must_use]
    pub const fn has_wallet(self) -> bool {
        matches!(self, Self::Student | Self::Parent)
    }
}

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login email, unique across the platform
    #[sea_orm(unique)]
    pub email: String,
    /// Account role
    pub role: UserRole,
    /// School this user belongs to; leaderboards are scoped per school
    pub school_id: i64,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each user has exactly one profile
    #[sea_orm(has_one = "super::profile::Entity")]
    Profile,
    /// Student/parent users have one wallet
    #[sea_orm(has_one = "super::wallet::Entity")]
    Wallet,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
