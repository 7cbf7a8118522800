//! # Aroma Data
//!
//! Entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Database connection pool and migrations
//!
//! and reports the state of the user store.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use aroma_data::config::Settings;
use aroma_data::domain::UserRepository;
use aroma_data::infrastructure::database::{create_pool, run_migrations, PgDatabase};
use aroma_data::infrastructure::repositories::SqlUserRepository;
use aroma_data::infrastructure::serializers::UserSerializer;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    aroma_data::telemetry::init_tracing(&settings.log);

    info!(environment = %settings.environment, "Configuration loaded");

    let pool = create_pool(&settings.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection pool created");

    if settings.database.run_migrations {
        run_migrations(&pool).await.context("Failed to run migrations")?;
        info!("Database migrations applied");
    }

    let users = SqlUserRepository::new(Arc::new(PgDatabase::new(pool)), Arc::new(UserSerializer));
    let recent = users.get_recently_created_users().await;
    info!(count = recent.len(), "Recently created users");

    Ok(())
}
