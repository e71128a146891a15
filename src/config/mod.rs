/// Badge catalog loading from badges.toml
pub mod badges;

/// Database configuration and connection management
pub mod database;
