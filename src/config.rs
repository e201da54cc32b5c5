/// Configuration management for board-service
///
/// All configuration is read from environment variables once at startup and
/// carried in an immutable `Config` that `main` hands to the server factory.
/// Nothing in the application reads process globals after boot.
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;

/// Flash-cookie signing keys must carry at least this much material.
const MIN_SECRET_KEY_BYTES: usize = 64;

/// Main application configuration
#[derive(Clone)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Delivery map configuration
    pub map: MapConfig,
    /// Signing key material for the flash-notice cookie
    pub secret_key: Vec<u8>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app", &self.app)
            .field("database", &self.database)
            .field("map", &self.map)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
///
/// The board schema lives in PostgreSQL; connections are described by host
/// parts rather than a URL because the deployment environment provides them
/// that way (DB_HOST, DB_PORT, ...).
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// One of disable | allow | prefer | require | verify-ca | verify-full
    pub sslmode: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Min connections kept warm in pool
    pub min_connections: u32,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout_secs: u64,
    /// Close connections idle for longer than this
    pub idle_timeout_secs: u64,
    /// Maximum lifetime of a single connection
    pub max_lifetime_secs: u64,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("sslmode", &self.sslmode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .finish()
    }
}

/// Delivery map configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Alternate tile source URL; the public CartoDB Positron tiles are used
    /// when unset
    pub tile_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let database = {
            let password = std::env::var("DB_PASSWORD").unwrap_or_default();
            if production && password.trim().is_empty() {
                return Err("DB_PASSWORD must be set in production".to_string());
            }

            let sslmode =
                std::env::var("DB_SSLMODE").unwrap_or_else(|_| "require".to_string());
            // Fail at boot, not on first query.
            parse_ssl_mode(&sslmode)?;

            DatabaseConfig {
                host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: parse_env_or_default("DB_PORT", 5432)?,
                name: std::env::var("DB_NAME").unwrap_or_else(|_| "board".to_string()),
                user: std::env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
                password,
                sslmode,
                max_connections: parse_env_or_default("DB_MAX_CONNECTIONS", 10)?,
                min_connections: parse_env_or_default("DB_MIN_CONNECTIONS", 2)?,
                acquire_timeout_secs: parse_env_or_default("DB_ACQUIRE_TIMEOUT_SECS", 10)?,
                idle_timeout_secs: parse_env_or_default("DB_IDLE_TIMEOUT_SECS", 600)?,
                max_lifetime_secs: parse_env_or_default("DB_MAX_LIFETIME_SECS", 1800)?,
            }
        };

        let secret_key = match std::env::var("SECRET_KEY") {
            Ok(value) => {
                let bytes = value.into_bytes();
                if bytes.len() < MIN_SECRET_KEY_BYTES {
                    return Err(format!(
                        "SECRET_KEY must be at least {} bytes, got {}",
                        MIN_SECRET_KEY_BYTES,
                        bytes.len()
                    ));
                }
                bytes
            }
            Err(_) if production => {
                return Err(
                    "SECRET_KEY must be set in production (notices are signed cookies)"
                        .to_string(),
                )
            }
            Err(_) => {
                // Fresh key per process; pending notices do not survive a
                // restart.
                let mut bytes = vec![0u8; MIN_SECRET_KEY_BYTES];
                rand::thread_rng().fill_bytes(&mut bytes);
                bytes
            }
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("APP_PORT", 8080)?,
            },
            database,
            map: MapConfig {
                tile_url: std::env::var("MAP_TILE_URL").ok().filter(|v| !v.is_empty()),
            },
            secret_key,
        })
    }
}

impl DatabaseConfig {
    /// Typed connect options for sqlx; the sslmode string was validated at
    /// load time, so the fallback arm here is unreachable in practice.
    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = parse_ssl_mode(&self.sslmode).unwrap_or(PgSslMode::Require);

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }
}

fn parse_ssl_mode(value: &str) -> Result<PgSslMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "disable" => Ok(PgSslMode::Disable),
        "allow" => Ok(PgSslMode::Allow),
        "prefer" => Ok(PgSslMode::Prefer),
        "require" => Ok(PgSslMode::Require),
        "verify-ca" => Ok(PgSslMode::VerifyCa),
        "verify-full" => Ok(PgSslMode::VerifyFull),
        other => Err(format!("Unknown DB_SSLMODE '{}'", other)),
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "DB_HOST",
            "DB_PORT",
            "DB_NAME",
            "DB_USER",
            "DB_PASSWORD",
            "DB_SSLMODE",
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "DB_ACQUIRE_TIMEOUT_SECS",
            "DB_IDLE_TIMEOUT_SECS",
            "DB_MAX_LIFETIME_SECS",
            "SECRET_KEY",
            "MAP_TILE_URL",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial_test::serial]
    fn defaults_without_env() {
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.sslmode, "require");
        assert_eq!(config.database.max_connections, 10);
        assert!(config.map.tile_url.is_none());
        // Generated key is long enough to sign cookies.
        assert!(config.secret_key.len() >= MIN_SECRET_KEY_BYTES);
    }

    #[test]
    #[serial_test::serial]
    fn env_overrides_are_applied() {
        clear_env();
        std::env::set_var("DB_HOST", "db.example.com");
        std::env::set_var("DB_PORT", "6432");
        std::env::set_var("DB_SSLMODE", "prefer");
        std::env::set_var("MAP_TILE_URL", "https://tiles.example.com/{z}/{x}/{y}.png");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database.host, "db.example.com");
        assert_eq!(config.database.port, 6432);
        assert_eq!(config.database.sslmode, "prefer");
        assert_eq!(
            config.map.tile_url.as_deref(),
            Some("https://tiles.example.com/{z}/{x}/{y}.png")
        );

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn production_requires_password_and_secret() {
        clear_env();
        std::env::set_var("APP_ENV", "production");

        let err = Config::from_env().unwrap_err();
        assert!(err.contains("DB_PASSWORD"));

        std::env::set_var("DB_PASSWORD", "s3cret");
        let err = Config::from_env().unwrap_err();
        assert!(err.contains("SECRET_KEY"));

        std::env::set_var("SECRET_KEY", "a".repeat(64));
        assert!(Config::from_env().is_ok());

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn short_secret_key_is_rejected() {
        clear_env();
        std::env::set_var("SECRET_KEY", "too-short");

        let err = Config::from_env().unwrap_err();
        assert!(err.contains("SECRET_KEY"));

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn unknown_sslmode_is_rejected() {
        clear_env();
        std::env::set_var("DB_SSLMODE", "mandatory");

        let err = Config::from_env().unwrap_err();
        assert!(err.contains("DB_SSLMODE"));

        clear_env();
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            name: "board".into(),
            user: "postgres".into(),
            password: "hunter2".into(),
            sslmode: "require".into(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        };

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }
}
