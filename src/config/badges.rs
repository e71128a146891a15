//! Badge catalog loading from badges.toml
//!
//! This module provides functionality to load the initial badge catalog from
//! a TOML configuration file. The badges defined in badges.toml are used to
//! seed the database on first run or when catalog entries are missing.
//! Existing badges are left untouched so admin edits survive re-runs.

use crate::{
    entities::{Badge, badge},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire badges.toml file
#[derive(Debug, Deserialize)]
pub struct BadgeCatalog {
    /// List of badge definitions to seed
    pub badges: Vec<BadgeDef>,
}

/// Configuration for a single catalog badge
#[derive(Debug, Deserialize, Clone)]
pub struct BadgeDef {
    /// Display name, unique across the catalog
    pub name: String,
    /// Short description shown alongside the badge
    #[serde(default)]
    pub description: String,
    /// Icon identifier used by the dashboard
    #[serde(default)]
    pub icon: String,
    /// XP granted on first award
    pub xp_value: i64,
}

/// Loads the badge catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<BadgeCatalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read badge catalog: {e}"),
    })?;

    parse_catalog(&contents)
}

/// Parses badge catalog TOML from a string
pub fn parse_catalog(contents: &str) -> Result<BadgeCatalog> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse badges.toml: {e}"),
    })
}

/// Seeds the badge table from a catalog, inserting only badges whose name is
/// not present yet. Returns the number of badges created.
pub async fn seed_badges(db: &DatabaseConnection, catalog: &BadgeCatalog) -> Result<usize> {
    let mut created = 0;

    for def in &catalog.badges {
        let existing = Badge::find()
            .filter(badge::Column::Name.eq(def.name.as_str()))
            .one(db)
            .await?;

        if existing.is_some() {
            debug!(name = %def.name, "badge already in catalog, skipping");
            continue;
        }

        crate::core::gamification::create_badge(
            db,
            def.name.clone(),
            def.description.clone(),
            def.icon.clone(),
            def.xp_value,
        )
        .await?;
        info!(name = %def.name, xp_value = def.xp_value, "seeded badge");
        created += 1;
    }

    Ok(created)
}
