use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DbErrKind, RetryConfig, classify_db_err, retry_while};

/// Open a pool using `config`
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Open a pool, retrying with backoff while the database is unreachable.
///
/// Errors other than [`DbErrKind::Unavailable`] (bad credentials, unknown
/// database) fail at once. `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();

    retry_while(
        || {
            let opts = options.clone();
            async move {
                let db = Database::connect(opts).await?;
                info!("Connected to PostgreSQL");
                Ok::<_, DbErr>(db)
            }
        },
        &retry_config.unwrap_or_default(),
        |e| classify_db_err(e) == DbErrKind::Unavailable,
    )
    .await
}

/// Apply every pending migration of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations complete");
    Ok(())
}
