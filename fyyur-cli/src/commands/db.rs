//! Database maintenance commands (migrate, seed)

use anyhow::{Context, Result};
use fyyur_server::db::{create_pool, migrations};
use fyyur_server::seed;

use super::SettingsArgs;

/// Create any missing tables and indexes.
pub async fn run_migrate(sources: &SettingsArgs) -> Result<()> {
    let settings = sources.resolve()?;
    let pool = create_pool(&settings.database_url)
        .await
        .context("Failed to open database")?;

    migrations::run(&pool).await.context("Migration failed")?;
    pool.close().await;

    println!("Database schema is up to date ({})", settings.database_url);
    Ok(())
}

/// Load the demo venues, artists and shows into an empty directory.
pub async fn run_seed(sources: &SettingsArgs) -> Result<()> {
    let settings = sources.resolve()?;
    let pool = create_pool(&settings.database_url)
        .await
        .context("Failed to open database")?;

    migrations::run(&pool).await.context("Migration failed")?;
    let report = seed(&pool).await.context("Seeding failed")?;
    pool.close().await;

    if report.skipped {
        println!("Directory already has venues; nothing seeded");
    } else {
        println!(
            "Seeded {} venues, {} artists and {} shows",
            report.venues, report.artists, report.shows
        );
    }
    Ok(())
}
