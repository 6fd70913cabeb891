use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;
use domain_accounts::DefaultAdmin;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub database_retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub default_admin: DefaultAdmin,
    /// `RUN_MIGRATIONS`, defaults to true
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let database_retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?; // JWT_SECRET is required
        let default_admin = DefaultAdmin::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            database,
            database_retry,
            server,
            environment,
            jwt,
            default_admin,
            run_migrations,
        })
    }
}
