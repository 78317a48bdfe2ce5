//! Simple login API
//!
//! A single-resource account management service over a `User` record:
//! signup, signin, profile fetch/update, signout and delete, with an opaque
//! session token issued on successful authentication.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::storage::{migrations::run_storage_migrations, StorageBackend};
use infrastructure::user::{
    AccountService, InMemoryUserRepository, PostgresUserRepository, TokenPolicy,
};

/// Create the application state with the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend = StorageBackend::from_str(&config.storage.backend)
        .ok_or_else(|| anyhow::anyhow!("Unknown storage backend: {}", config.storage.backend))?;

    let token_policy = if config.auth.issue_token_on_signup {
        TokenPolicy::IssueAtSignup
    } else {
        TokenPolicy::RequireSignin
    };

    info!("Storage backend: {:?}, token policy: {:?}", backend, token_policy);

    let state = match backend {
        StorageBackend::InMemory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            AppState::new(Arc::new(AccountService::new(repository, token_policy)))
        }
        StorageBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            // Schema is created/upgraded before the first request
            run_storage_migrations(&pool).await?;

            let repository = Arc::new(PostgresUserRepository::new(pool));
            AppState::new(Arc::new(AccountService::new(repository, token_policy)))
        }
    };

    Ok(state)
}
