//! Migrate command - applies schema migrations and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::migrations::{run_storage_migrations, PostgresMigrator};

/// Apply pending schema migrations
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    let pool = sqlx::PgPool::connect(&database_url).await?;

    run_storage_migrations(&pool).await?;

    let version = PostgresMigrator::new(pool).current_version().await?;
    info!("Schema at version {:?}", version);

    Ok(())
}
