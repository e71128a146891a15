//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod badge;
pub mod badge_ownership;
pub mod profile;
pub mod transaction;
pub mod user;
pub mod wallet;

// Re-export specific types to avoid conflicts
pub use badge::{Column as BadgeColumn, Entity as Badge, Model as BadgeModel};
pub use badge_ownership::{
    Column as BadgeOwnershipColumn, Entity as BadgeOwnership, Model as BadgeOwnershipModel,
};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel, TxStatus, TxType,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, UserRole};
pub use wallet::{Column as WalletColumn, Entity as Wallet, Model as WalletModel};
