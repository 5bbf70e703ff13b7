use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.connect_url());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    if !config.is_sqlite() {
        // hosted poolers close idle connections on their own schedule
        options.max_lifetime(Duration::from_secs(600));
    }

    let pool = Database::connect(options).await?;
    log::info!(
        "Connected to {} database",
        if config.is_sqlite() { "SQLite" } else { "Postgres" }
    );
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}
