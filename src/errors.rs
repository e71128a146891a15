//! Unified error types for the ledger and gamification engines.
//!
//! Every failure an engine can report is a variant here. Lookup and
//! validation failures carry the context a caller needs to map them onto an
//! HTTP response; none of them are transient, so no retry logic exists
//! anywhere in the crate.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    #[error("No wallet exists for user {user_id}")]
    WalletNotFound {
        /// User whose wallet was requested
        user_id: i64,
    },

    #[error("No profile exists for user {user_id}")]
    ProfileNotFound {
        /// User whose profile was requested
        user_id: i64,
    },

    #[error("No badge exists with id {badge_id}")]
    BadgeNotFound {
        /// Requested badge id
        badge_id: i64,
    },

    #[error("Insufficient balance: have {current}, payment requires {required}")]
    InsufficientBalance {
        /// Balance at the time the payment was rejected
        current: i64,
        /// Amount the payment asked for
        required: i64,
    },

    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
