use serde::Deserialize;
use std::fmt;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Where the PostgreSQL server lives and how the pool talks to it.
#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database name (`DB_NAME`, default `campaign_tracker`).
    pub name: String,
    /// Login role (`DB_USER`, default `postgres`).
    pub user: String,
    /// Password for `user` (`DB_PASSWORD`, default `postgres`).
    pub password: String,
    /// Server hostname (`DB_HOST`, default `localhost`).
    pub host: String,
    /// Server port (`DB_PORT`, default `5432`).
    pub port: u16,
    /// Upper bound on pooled connections (`DB_MAX_CONNECTIONS`, default 5).
    pub max_connections: u32,
    /// How long an operation waits for a connection before it is reported
    /// as unavailable (`DB_ACQUIRE_TIMEOUT_SECS`, default 5).
    pub acquire_timeout_secs: u64,
}

// The password must never end up in a log line.
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"********")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}
