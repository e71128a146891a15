/// Gamification engine - XP, levels, badges, and leaderboards
pub mod gamification;

/// Registration - user, profile, and wallet provisioning
pub mod registration;

/// Ledger engine - wallets and the transaction log
pub mod wallet;
