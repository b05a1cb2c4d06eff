use std::time::Duration;

use apiary_core::config::DatabaseConfig;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::db::DbProvider;
use crate::error::DbResult;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

/// Idle connections above `min_idle` are closed after this long.
const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
/// Connections are recycled after this long so server-side state does not pile up.
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);
/// How long a request waits for a free connection before failing.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing and recycling derived from `[database]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_size: u32,
    pub min_idle: u32,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub connection_timeout: Duration,
}

impl PoolSettings {
    /// Group traffic is bursty and short, so one warm connection is kept and
    /// the rest open on demand up to `max_connections` (at least one).
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let max_size = u32::from(config.max_connections).max(1);
        Self {
            max_size,
            min_idle: 1,
            idle_timeout: IDLE_TIMEOUT,
            max_lifetime: MAX_LIFETIME,
            connection_timeout: CONNECTION_TIMEOUT,
        }
    }
}

/// ## Summary
/// Creates the database connection pool for `[database]`.
///
/// ## Errors
/// Returns an error if the pool cannot be created with the configured database URL.
#[tracing::instrument(skip(config), fields(max_connections = config.max_connections))]
pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<DbPool> {
    let settings = PoolSettings::from_config(config);
    tracing::debug!(?settings, "Creating database connection pool");

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());

    let pool = Pool::builder()
        .max_size(settings.max_size)
        .min_idle(Some(settings.min_idle))
        .idle_timeout(Some(settings.idle_timeout))
        .max_lifetime(Some(settings.max_lifetime))
        .connection_timeout(settings.connection_timeout)
        .build(manager)
        .await?;

    tracing::info!(
        max_size = settings.max_size,
        min_idle = settings.min_idle,
        "Database connection pool created"
    );

    Ok(pool)
}

impl DbProvider for DbPool {
    #[tracing::instrument(skip(self))]
    fn get_connection<'a>(
        &'a self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>>
    {
        Box::pin(async move {
            let conn = self.get().await?;
            Ok(conn)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(max_connections: u8) -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/apiary".to_string(),
            max_connections,
        }
    }

    #[test]
    fn test_default_pool_keeps_one_warm_connection() {
        let settings = PoolSettings::from_config(&database(4));

        assert_eq!(settings.max_size, 4);
        assert_eq!(settings.min_idle, 1);
        assert_eq!(settings.idle_timeout, IDLE_TIMEOUT);
        assert_eq!(settings.max_lifetime, MAX_LIFETIME);
        assert_eq!(settings.connection_timeout, CONNECTION_TIMEOUT);
    }

    #[test]
    fn test_zero_max_connections_still_allows_one() {
        let settings = PoolSettings::from_config(&database(0));

        assert_eq!(settings.max_size, 1);
        assert!(settings.min_idle <= settings.max_size);
    }
}
