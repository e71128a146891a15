//! Provisioning entrypoint: initializes the database schema and seeds the
//! badge catalog. The REST layer invokes the engines in `nexus_core::core`
//! directly; this binary only prepares the store they run against.

use dotenvy::dotenv;
use nexus_core::{config, errors::Result};
use std::{env, path::Path};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally

    // 3. Connect and create the schema from the entity definitions
    let database_url = config::database::get_database_url()?;
    info!(%database_url, "connecting to database");

    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("database schema ready");

    // 4. Seed the badge catalog (if a catalog file is present)
    let catalog_path =
        env::var("BADGE_CATALOG").unwrap_or_else(|_| "badges.toml".to_string());
    if Path::new(&catalog_path).exists() {
        let catalog = config::badges::load_catalog(&catalog_path)?;
        let created = config::badges::seed_badges(&db, &catalog).await?;
        info!(
            created,
            total = catalog.badges.len(),
            "badge catalog seeded"
        );
    } else {
        warn!(path = %catalog_path, "no badge catalog found, skipping seed");
    }

    Ok(())
}
