use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

/// Translates the resolved settings into driver connection options.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
}

/// Builds the connection pool to the PostgreSQL database.
///
/// The pool is lazy: no connection is opened here. Each repository operation
/// acquires its own connection, so an unreachable server surfaces as an
/// `Unavailable` failure of that operation once `acquire_timeout_secs` has
/// elapsed, instead of aborting start-up.
pub fn connect(settings: &DatabaseSettings) -> PgPool {
    tracing::debug!(
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        "Configuring database pool."
    );
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_lazy_with(connect_options(settings))
}

/// A utility function to run database migrations automatically.
///
/// Creates the campaign, customer, segment and metric tables on first start
/// and keeps them current afterwards.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            name: "Marketing campaign manager".to_string(),
            user: "tracker".to_string(),
            password: "p@ss word#1".to_string(),
            host: "db.example.internal".to_string(),
            port: 6432,
            max_connections: 3,
            acquire_timeout_secs: 2,
        }
    }

    #[test]
    fn options_carry_every_setting_verbatim() {
        let options = connect_options(&settings());
        assert_eq!(options.get_host(), "db.example.internal");
        assert_eq!(options.get_port(), 6432);
        assert_eq!(options.get_username(), "tracker");
        assert_eq!(options.get_database(), Some("Marketing campaign manager"));
    }

    #[tokio::test]
    async fn building_the_pool_does_not_connect() {
        let pool = connect(&settings());
        assert_eq!(pool.size(), 0);
        assert_eq!(pool.options().get_max_connections(), 3);
    }
}
