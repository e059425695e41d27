//! Lightweight database primitives shared by the server and the test harness.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Shared pooled connection alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("database connection failed: {0}")]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;

/// Environment-driven connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_url_key")]
    env_key: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(default_url_key())
    }
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            sqlx_logging: false,
        }
    }

    /// Reads `DATABASE_MAX_CONNECTIONS` and `DATABASE_SQLX_LOGGING` on top of the defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(max) = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|max| *max > 0)
        {
            settings.max_connections = max;
        }
        settings.sqlx_logging = std::env::var("DATABASE_SQLX_LOGGING")
            .ok()
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        settings
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DbError::MissingUrl(self.env_key.clone()))
    }

    fn connect_options(&self, url: String) -> ConnectOptions {
        let mut options = ConnectOptions::new(url);
        options
            .max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

/// Open a pooled connection using the URL named by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    connect_url(settings, url).await
}

/// Open a pooled connection to an explicit URL (tests, containers).
pub async fn connect_url(settings: &DatabaseSettings, url: impl Into<String>) -> DbResult<DbPool> {
    let pool = Database::connect(settings.connect_options(url.into())).await?;
    info!(
        backend = ?pool.get_database_backend(),
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_names_the_variable() {
        let settings = DatabaseSettings::new("HR_TEST_DATABASE_URL_THAT_IS_NEVER_SET");
        let err = settings.database_url().unwrap_err();
        assert_eq!(
            err.to_string(),
            "database url missing (set HR_TEST_DATABASE_URL_THAT_IS_NEVER_SET)"
        );
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let settings = DatabaseSettings::default();
        let pool = connect_url(&settings, "sqlite::memory:").await.unwrap();
        assert_eq!(
            pool.get_database_backend(),
            sea_orm::DatabaseBackend::Sqlite
        );
    }
}
