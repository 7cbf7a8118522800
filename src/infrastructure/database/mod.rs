//! PostgreSQL pool setup, migrations, and the store boundary used by
//! repositories: named statements, store-independent rows, the [`Database`]
//! capability and the [`DatabaseSerializer`] strategy.

pub mod row;
pub mod serializer;
pub mod statements;
pub mod store;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;

pub use row::{Row, SqlType, SqlValue};
pub use serializer::DatabaseSerializer;
pub use statements::{deletes, inserts, queries, Statement};
pub use store::{Database, PgDatabase};

#[cfg(test)]
pub use store::MockDatabase;

/// Open a pool sized by `settings`.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max = settings.max_connections,
        min = settings.min_connections,
        "Opening connection pool"
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(settings.connection_url())
        .await
}

/// Apply the SQL files under `migrations/` that have not run yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
