//! Registration - provisions the per-user aggregates.
//!
//! Creating an account writes the user row, its profile, and - for roles
//! that hold token balances - its wallet, all inside one database
//! transaction. Authentication and authorization happen elsewhere; this
//! module only owns the relational provisioning.

use crate::{
    entities::{UserRole, profile, user, wallet},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// The rows created for a new account.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    /// The account itself
    pub user: user::Model,
    /// Profile with zero XP at level 1
    pub profile: profile::Model,
    /// Wallet with zero balance; `None` for roles without one
    pub wallet: Option<wallet::Model>,
}

/// Registers a user, creating the profile and (for student/parent roles)
/// the wallet in the same database transaction.
///
/// The profile starts at 0 XP, level 1; the wallet starts at balance 0.
/// A duplicate email fails on the unique constraint and rolls everything
/// back.
pub async fn register_user(
    db: &DatabaseConnection,
    email: String,
    first_name: String,
    last_name: String,
    role: UserRole,
    school_id: i64,
) -> Result<RegisteredUser> {
    if email.trim().is_empty() {
        return Err(Error::Config {
            message: "Email cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let new_user = user::ActiveModel {
        email: Set(email.trim().to_string()),
        role: Set(role),
        school_id: Set(school_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created_user = new_user.insert(&txn).await?;

    let new_profile = profile::ActiveModel {
        user_id: Set(created_user.id),
        first_name: Set(first_name),
        last_name: Set(last_name),
        xp: Set(0),
        level: Set(1),
        ..Default::default()
    };
    let created_profile = new_profile.insert(&txn).await?;

    let created_wallet = if role.has_wallet() {
        Some(crate::core::wallet::create_wallet(&txn, created_user.id).await?)
    } else {
        None
    };

    txn.commit().await?;

    info!(user_id = created_user.id, ?role, "registered user");

    Ok(RegisteredUser {
        user: created_user,
        profile: created_profile,
        wallet: created_wallet,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Profile, Wallet};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_register_student_provisions_wallet() -> Result<()> {
        let db = setup_test_db().await?;

        let student = create_test_student(&db, "student@school.test").await?;

        assert_eq!(student.user.email, "student@school.test");
        assert_eq!(student.user.role, UserRole::Student);
        assert_eq!(student.profile.xp, 0);
        assert_eq!(student.profile.level, 1);

        let wallet = student.wallet.unwrap();
        assert_eq!(wallet.balance, 0);
        assert_eq!(wallet.user_id, student.user.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_parent_provisions_wallet() -> Result<()> {
        let db = setup_test_db().await?;

        let parent = create_test_user(&db, "parent@school.test", UserRole::Parent, 1).await?;
        assert!(parent.wallet.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_register_staff_roles_have_no_wallet() -> Result<()> {
        let db = setup_test_db().await?;

        let teacher = create_test_user(&db, "teacher@school.test", UserRole::Teacher, 1).await?;
        let admin = create_test_user(&db, "admin@school.test", UserRole::Admin, 1).await?;

        assert!(teacher.wallet.is_none());
        assert!(admin.wallet.is_none());

        // No wallet row exists, but the profile does
        let wallets = Wallet::find().all(&db).await?;
        assert!(wallets.is_empty());
        let profiles = Profile::find().all(&db).await?;
        assert_eq!(profiles.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_empty_email() -> Result<()> {
        let db = setup_test_db().await?;

        let result = register_user(
            &db,
            "   ".to_string(),
            "No".to_string(),
            "Body".to_string(),
            UserRole::Student,
            1,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_student(&db, "dup@school.test").await?;
        let result = create_test_student(&db, "dup@school.test").await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        Ok(())
    }
}
