//! Shared fixtures for database-backed tests.

use migration::MigratorTrait;
use models::db::connect_in_memory;
use sea_orm::DatabaseConnection;

/// A fresh in-memory SQLite database with every migration applied.
/// Each call returns an isolated database.
pub async fn get_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
