//! Transaction entity - Append-only ledger records behind each wallet.
//!
//! Each transaction stores a positive `amount` magnitude; direction is
//! derived from [`TxType`] at every read via [`TxType::sign`], never stored.
//! Rows are immutable once created and history queries order by `timestamp`
//! descending.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction kind, stored as a closed string enum.
///
/// The kind is the only source of a transaction's direction: deposits and
/// refunds credit the wallet, payments debit it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TxType {
    /// Funds added to the wallet
    #[sea_orm(string_value = "DEPOSIT")]
    Deposit,
    /// Funds spent from the wallet
    #[sea_orm(string_value = "PAYMENT")]
    Payment,
    /// A reversed payment credited back to the wallet
    #[sea_orm(string_value = "REFUND")]
    Refund,
}

impl TxType {
    /// Sign applied to the stored positive magnitude when mutating a
    /// balance or replaying history: +1 for credits, -1 for debits.
    #[must_use]
    pub const fn sign(self) -> i64 {
        match self {
            Self::Deposit | Self::Refund => 1,
            Self::Payment => -1,
        }
    }
}

/// Settlement status of a transaction.
///
/// No pending/failed lifecycle is modeled; every transaction is created
/// `Completed`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TxStatus {
    /// Settled against the wallet balance
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the wallet this transaction belongs to
    pub wallet_id: i64,
    /// Positive magnitude in minor units; direction comes from `tx_type`
    pub amount: i64,
    /// Transaction kind deciding the sign of the balance change
    pub tx_type: TxType,
    /// Free-text label used for spend categorization (e.g. "canteen")
    pub category: String,
    /// Optional human-readable note
    pub description: Option<String>,
    /// Settlement status, always `Completed` in the current design
    pub status: TxStatus,
    /// When the transaction was created
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one wallet
    #[sea_orm(
        belongs_to = "super::wallet::Entity",
        from = "Column::WalletId",
        to = "super::wallet::Column::Id"
    )]
    Wallet,
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
