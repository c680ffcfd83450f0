use crate::error::ConfigError;
use crate::settings::Settings;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LoggingSettings};
pub use telemetry::init_tracing;

/// Environment variables consulted on top of the file, with the settings key
/// each one overrides.
const ENV_OVERRIDES: [(&str, &str); 8] = [
    ("DB_NAME", "database.name"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_MAX_CONNECTIONS", "database.max_connections"),
    ("DB_ACQUIRE_TIMEOUT_SECS", "database.acquire_timeout_secs"),
    ("LOG_DIR", "logging.directory"),
];

/// Loads the application configuration.
///
/// Every value has a default, so this succeeds with neither a `config.toml`
/// nor any `DB_*` variable present. An optional `config.toml` in the working
/// directory is layered on top of the defaults, and the process environment
/// on top of that.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Some("config"), |key| std::env::var(key).ok())
}

/// Same as [`load_settings`], with the config file name and the environment
/// lookup supplied by the caller.
pub fn load_settings_from<F>(file: Option<&str>, env: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = config::Config::builder()
        .set_default("database.name", "campaign_tracker")?
        .set_default("database.user", "postgres")?
        .set_default("database.password", "postgres")?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432)?
        .set_default("database.max_connections", 5)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.level", "info")?;

    if let Some(name) = file {
        // Tells the builder to look for `config.toml` (or any supported
        // extension) but not to insist on it.
        builder = builder.add_source(config::File::with_name(name).required(false));
    }

    for (var, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(key, env(var))?;
    }

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    if settings.database.acquire_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "database.acquire_timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}
