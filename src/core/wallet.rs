//! Ledger engine - wallet balances and the append-only transaction log.
//!
//! Every balance change is backed by exactly one transaction record. The
//! insert of the transaction row and the balance update are paired inside a
//! single database transaction, so a failure between the two writes can never
//! leave the displayed balance out of sync with the replayable history.
//! Payments that would drive the balance negative are rejected before any
//! mutation. All functions are async and return Result types for error
//! handling.

use crate::{
    entities::{Transaction, TxStatus, TxType, Wallet, transaction, wallet},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};

/// Number of recent transactions included in the wallet view.
const RECENT_TRANSACTIONS: u64 = 20;

/// Default cap for transaction history queries.
const DEFAULT_HISTORY_LIMIT: u64 = 50;

/// Creates a wallet for a user with a zero starting balance.
///
/// Called from registration for roles that hold balances; generic over the
/// connection so it can participate in the registration transaction.
pub async fn create_wallet<C>(db: &C, user_id: i64) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    let wallet = wallet::ActiveModel {
        user_id: Set(user_id),
        balance: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    wallet.insert(db).await.map_err(Into::into)
}

/// Retrieves a user's wallet together with its most recent transactions,
/// newest first.
///
/// This backs the dashboard wallet view. Only wallet-holding roles have a
/// wallet; for anyone else the lookup fails with `WalletNotFound`.
pub async fn get_wallet(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<(wallet::Model, Vec<transaction::Model>)> {
    let wallet = wallet_for_user(db, user_id).await?;

    let recent = Transaction::find()
        .filter(transaction::Column::WalletId.eq(wallet.id))
        .order_by_desc(transaction::Column::Timestamp)
        .order_by_desc(transaction::Column::Id)
        .limit(RECENT_TRANSACTIONS)
        .all(db)
        .await?;

    Ok((wallet, recent))
}

/// Creates a transaction and applies it to the wallet balance.
///
/// The stored `amount` is always a positive magnitude; the balance delta is
/// derived from the transaction kind via [`TxType::sign`]. For payments the
/// current balance must cover the amount, otherwise the request is rejected
/// with `InsufficientBalance` and nothing is written. The transaction row
/// (created `Completed`) and the balance update commit together or not at
/// all.
///
/// # Arguments
/// * `user_id` - Owner of the wallet to transact against
/// * `amount` - Positive magnitude in minor units
/// * `tx_type` - Transaction kind deciding the direction
/// * `category` - Free-text spend category
/// * `description` - Optional human-readable note
pub async fn create_transaction(
    db: &DatabaseConnection,
    user_id: i64,
    amount: i64,
    tx_type: TxType,
    category: String,
    description: Option<String>,
) -> Result<transaction::Model> {
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let wallet = wallet_for_user(&txn, user_id).await?;

    // Reject underfunded payments before any write
    if tx_type == TxType::Payment && wallet.balance < amount {
        return Err(Error::InsufficientBalance {
            current: wallet.balance,
            required: amount,
        });
    }

    let transaction_model = transaction::ActiveModel {
        wallet_id: Set(wallet.id),
        amount: Set(amount),
        tx_type: Set(tx_type),
        category: Set(category),
        description: Set(description),
        status: Set(TxStatus::Completed),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = transaction_model.insert(&txn).await?;

    // Atomically apply the signed delta to the balance
    update_wallet_balance_atomic(&txn, wallet.id, amount * tx_type.sign()).await?;

    // Commit the transaction
    txn.commit().await?;

    Ok(result)
}

/// Retrieves up to `limit` transactions for a user's wallet, newest first.
///
/// Defaults to the standard history page size when no limit is given. Fails
/// with `WalletNotFound` if the user has no wallet.
pub async fn get_transaction_history(
    db: &DatabaseConnection,
    user_id: i64,
    limit: Option<u64>,
) -> Result<Vec<transaction::Model>> {
    let wallet = wallet_for_user(db, user_id).await?;

    Transaction::find()
        .filter(transaction::Column::WalletId.eq(wallet.id))
        .order_by_desc(transaction::Column::Timestamp)
        .order_by_desc(transaction::Column::Id)
        .limit(limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks up the wallet owned by `user_id`.
async fn wallet_for_user<C>(db: &C, user_id: i64) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    Wallet::find()
        .filter(wallet::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { user_id })
}

/// Applies a signed delta to a wallet balance with a database-level update.
///
/// Uses a single `UPDATE wallets SET balance = balance + delta WHERE id = ?`
/// statement instead of read-modify-write, so concurrent committed
/// transactions cannot lose updates. Private: every balance change must go
/// through [`create_transaction`] so it stays paired with a ledger record.
async fn update_wallet_balance_atomic<C>(
    db: &C,
    wallet_id: i64,
    delta: i64,
) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).add(delta),
        )
        .filter(wallet::Column::Id.eq(wallet_id))
        .exec(db)
        .await?;

    // Return the updated wallet
    Wallet::find_by_id(wallet_id)
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { user_id: wallet_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_tx_type_sign_mapping() {
        assert_eq!(TxType::Deposit.sign(), 1);
        assert_eq!(TxType::Refund.sign(), 1);
        assert_eq!(TxType::Payment.sign(), -1);
    }

    #[tokio::test]
    async fn test_create_transaction_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Test zero amount validation
        let result = create_transaction(
            &db,
            1,
            0,
            TxType::Deposit,
            "allowance".to_string(),
            None,
        )
        .await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: 0 }
        ));

        // Test negative amount validation - magnitudes are always positive,
        // direction comes from the transaction kind
        let result = create_transaction(
            &db,
            1,
            -50,
            TxType::Payment,
            "canteen".to_string(),
            None,
        )
        .await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -50 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_wallet_not_found() -> Result<()> {
        // Configure MockDatabase to return no wallet (simulating not found)
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<wallet::Model>::new()])
            .into_connection();

        let result = create_transaction(
            &db,
            999,
            50,
            TxType::Deposit,
            "allowance".to_string(),
            None,
        )
        .await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Error::WalletNotFound { user_id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_insufficient_balance() -> Result<()> {
        let low_balance_wallet = wallet::Model {
            id: 1,
            user_id: 1,
            balance: 10,
            created_at: chrono::Utc::now(),
        };

        // Configure MockDatabase to return a wallet with a low balance
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![low_balance_wallet]])
            .into_connection();

        // Try to pay more than the available balance
        let result = create_transaction(
            &db,
            1,
            20,
            TxType::Payment,
            "canteen".to_string(),
            None,
        )
        .await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientBalance {
                current: 10,
                required: 20
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_deposit_payment_scenario() -> Result<()> {
        let (db, student) = setup_with_student().await?;
        let user_id = student.user.id;

        // Wallet starts empty
        assert_eq!(student.wallet.unwrap().balance, 0);

        // DEPOSIT 100 -> balance 100
        create_test_deposit(&db, user_id, 100).await?;
        let (wallet, _) = get_wallet(&db, user_id).await?;
        assert_eq!(wallet.balance, 100);

        // PAYMENT 30 -> balance 70, 2 transactions in history
        create_transaction(
            &db,
            user_id,
            30,
            TxType::Payment,
            "canteen".to_string(),
            Some("lunch".to_string()),
        )
        .await?;
        let (wallet, recent) = get_wallet(&db, user_id).await?;
        assert_eq!(wallet.balance, 70);
        assert_eq!(recent.len(), 2);

        // PAYMENT 1000 -> fails, balance remains 70, history still has 2 entries
        let result = create_transaction(
            &db,
            user_id,
            1000,
            TxType::Payment,
            "canteen".to_string(),
            None,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientBalance {
                current: 70,
                required: 1000
            }
        ));

        let (wallet, recent) = get_wallet(&db, user_id).await?;
        assert_eq!(wallet.balance, 70);
        assert_eq!(recent.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_refund_credits_balance() -> Result<()> {
        let (db, student) = setup_with_student().await?;
        let user_id = student.user.id;

        create_test_deposit(&db, user_id, 200).await?;
        create_transaction(
            &db,
            user_id,
            80,
            TxType::Payment,
            "bookstore".to_string(),
            None,
        )
        .await?;
        create_transaction(
            &db,
            user_id,
            80,
            TxType::Refund,
            "bookstore".to_string(),
            Some("returned book".to_string()),
        )
        .await?;

        let (wallet, _) = get_wallet(&db, user_id).await?;
        assert_eq!(wallet.balance, 200);

        Ok(())
    }

    #[tokio::test]
    async fn test_balance_matches_history_replay() -> Result<()> {
        let (db, student) = setup_with_student().await?;
        let user_id = student.user.id;

        create_test_deposit(&db, user_id, 500).await?;
        create_transaction(&db, user_id, 120, TxType::Payment, "canteen".to_string(), None)
            .await?;
        create_transaction(&db, user_id, 40, TxType::Refund, "canteen".to_string(), None)
            .await?;
        create_transaction(&db, user_id, 75, TxType::Payment, "trip".to_string(), None)
            .await?;

        let (wallet, _) = get_wallet(&db, user_id).await?;
        let history = get_transaction_history(&db, user_id, None).await?;

        // Replaying type + amount over the full history reconstructs the balance
        let replayed: i64 = history.iter().map(|tx| tx.amount * tx.tx_type.sign()).sum();
        assert_eq!(wallet.balance, replayed);
        assert_eq!(wallet.balance, 345);

        Ok(())
    }

    #[tokio::test]
    async fn test_transaction_fields_stored_correctly() -> Result<()> {
        let (db, student) = setup_with_student().await?;
        let user_id = student.user.id;

        let before = chrono::Utc::now();
        let tx = create_transaction(
            &db,
            user_id,
            250,
            TxType::Deposit,
            "allowance".to_string(),
            Some("weekly top-up".to_string()),
        )
        .await?;
        let after = chrono::Utc::now();

        assert_eq!(tx.amount, 250);
        assert_eq!(tx.tx_type, TxType::Deposit);
        assert_eq!(tx.category, "allowance");
        assert_eq!(tx.description, Some("weekly top-up".to_string()));
        assert_eq!(tx.status, TxStatus::Completed);
        assert!(tx.timestamp >= before && tx.timestamp <= after);

        // Verify persistence
        let retrieved = Transaction::find_by_id(tx.id).one(&db).await?.unwrap();
        assert_eq!(retrieved, tx);

        Ok(())
    }

    #[tokio::test]
    async fn test_history_limit_and_order() -> Result<()> {
        let (db, student) = setup_with_student().await?;
        let user_id = student.user.id;

        let first = create_test_deposit(&db, user_id, 10).await?;
        let second = create_test_deposit(&db, user_id, 20).await?;
        let third = create_test_deposit(&db, user_id, 30).await?;

        // Newest first
        let history = get_transaction_history(&db, user_id, None).await?;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, third.id);
        assert_eq!(history[1].id, second.id);
        assert_eq!(history[2].id, first.id);

        // Limit caps the page size from the newest end
        let limited = get_transaction_history(&db, user_id, Some(2)).await?;
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, third.id);
        assert_eq!(limited[1].id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_wallet_not_found_for_non_wallet_role() -> Result<()> {
        let db = setup_test_db().await?;

        // Teachers are not provisioned with wallets
        let teacher = create_test_user(
            &db,
            "teacher@school.test",
            crate::entities::UserRole::Teacher,
            1,
        )
        .await?;
        assert!(teacher.wallet.is_none());

        let result = get_wallet(&db, teacher.user.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::WalletNotFound { user_id: _ }
        ));

        // Unknown users have no wallet either
        let result = get_transaction_history(&db, 9999, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::WalletNotFound { user_id: 9999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_wallets_are_isolated_per_user() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_student(&db, "alice@school.test").await?;
        let bob = create_test_student(&db, "bob@school.test").await?;

        create_test_deposit(&db, alice.user.id, 100).await?;
        create_test_deposit(&db, bob.user.id, 40).await?;

        let (alice_wallet, alice_recent) = get_wallet(&db, alice.user.id).await?;
        let (bob_wallet, bob_recent) = get_wallet(&db, bob.user.id).await?;

        assert_eq!(alice_wallet.balance, 100);
        assert_eq!(bob_wallet.balance, 40);
        assert_eq!(alice_recent.len(), 1);
        assert_eq!(bob_recent.len(), 1);

        Ok(())
    }
}
