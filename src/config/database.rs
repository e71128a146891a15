//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to automatically
//! generate SQL statements from the entity models, ensuring that the database
//! schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Badge, BadgeOwnership, Profile, Transaction, User, Wallet};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file (created on first open) if not found.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/nexus_core.sqlite?mode=rwc".to_string()))
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set. This function handles connection errors and provides a clean
/// interface for database access throughout the crate.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically
/// generate proper SQL statements for table creation. It creates tables for
/// users, profiles, wallets, transactions, badges, and badge ownerships.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = schema.create_table_from_entity(User);
    let profile_table = schema.create_table_from_entity(Profile);
    let wallet_table = schema.create_table_from_entity(Wallet);
    let transaction_table = schema.create_table_from_entity(Transaction);
    let badge_table = schema.create_table_from_entity(Badge);
    let badge_ownership_table = schema.create_table_from_entity(BadgeOwnership);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&profile_table)).await?;
    db.execute(builder.build(&wallet_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&badge_table)).await?;
    db.execute(builder.build(&badge_ownership_table)).await?;

    Ok(())
}
