use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DatabaseConfig};

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds and tears down the shared connection pool
pub struct DatabaseManager;

impl DatabaseManager {
    /// Create the bounded pool. Connections open lazily, so the server can
    /// start (and report a degraded /health) while the database is down.
    pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = config.connection_string()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy(&connection_string)?;

        info!(
            "Created database pool for {} (max {} connections)",
            config.target()?,
            config.max_connections
        );
        Ok(pool)
    }

    /// Close the pool, waiting for checked-out connections to come back
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lazy_pool_starts_empty() {
        let config = DatabaseConfig {
            url: Some("postgres://nobody@127.0.0.1:1/none".to_string()),
            max_connections: 3,
            ..crate::config::AppConfig::from_env().database
        };
        let pool = DatabaseManager::connect(&config).unwrap();
        assert_eq!(pool.size(), 0);
        assert_eq!(pool.options().get_max_connections(), 3);
    }

    #[test]
    fn invalid_url_is_a_config_error() {
        let config = DatabaseConfig {
            url: Some("::".to_string()),
            ..crate::config::AppConfig::from_env().database
        };
        assert!(matches!(
            DatabaseManager::connect(&config),
            Err(DatabaseError::Config(ConfigError::InvalidDatabaseUrl(_)))
        ));
    }
}
