//! Shared test utilities for `NexusCore`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{gamification, registration, wallet},
    entities::{self, TxType, UserRole},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Registers a test user with custom role and school.
/// Use this when wallet provisioning or leaderboard scoping matters.
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
    role: UserRole,
    school_id: i64,
) -> Result<registration::RegisteredUser> {
    registration::register_user(
        db,
        email.to_string(),
        "Test".to_string(),
        "Student".to_string(),
        role,
        school_id,
    )
    .await
}

/// Registers a test student with sensible defaults.
///
/// # Defaults
/// * `role`: Student (wallet provisioned)
/// * `school_id`: 1
/// * name: "Test Student"
pub async fn create_test_student(
    db: &DatabaseConnection,
    email: &str,
) -> Result<registration::RegisteredUser> {
    create_test_user(db, email, UserRole::Student, 1).await
}

/// Creates a deposit transaction with a default category.
pub async fn create_test_deposit(
    db: &DatabaseConnection,
    user_id: i64,
    amount: i64,
) -> Result<entities::transaction::Model> {
    wallet::create_transaction(
        db,
        user_id,
        amount,
        TxType::Deposit,
        "allowance".to_string(),
        None,
    )
    .await
}

/// Creates a catalog badge with empty display metadata.
pub async fn create_test_badge(
    db: &DatabaseConnection,
    name: &str,
    xp_value: i64,
) -> Result<entities::badge::Model> {
    gamification::create_badge(
        db,
        name.to_string(),
        String::new(),
        String::new(),
        xp_value,
    )
    .await
}

/// Sets up a complete test environment with a registered student.
/// Returns (db, student) for common test scenarios.
pub async fn setup_with_student() -> Result<(DatabaseConnection, registration::RegisteredUser)> {
    let db = setup_test_db().await?;
    let student = create_test_student(&db, "student@school.test").await?;
    Ok((db, student))
}
