//! Environment-driven process configuration.
//!
//! `AppSettings` covers the handful of variables read once at startup;
//! `DatabasePoolSettings` carries pool sizing loaded via OrthoConfig.

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use url::Url;

const PORT_ENV: &str = "PORT";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const CORS_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";

/// Port bound when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;
/// Origin allowed by the CORS policy when `CORS_ALLOWED_ORIGIN` is not set.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://cadastro-usuarios-kappa.vercel.app";

/// Errors raised while reading process configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Startup settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// PostgreSQL connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Single origin allowed by the CORS policy, without a trailing slash.
    pub allowed_origin: String,
}

impl AppSettings {
    /// Read settings from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidEnv`] when `PORT` is not a valid port
    /// number or `CORS_ALLOWED_ORIGIN` is not an http(s) origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockable::MockEnv;
    /// use usuarios::settings::AppSettings;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "PORT" => Some("8080".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.port, 8080);
    /// assert!(settings.database_url.is_none());
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let port = port_from_env(env)?;
        let allowed_origin = allowed_origin_from_env(env)?;
        let database_url = env
            .string(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty());
        if database_url.is_none() {
            warn!("DATABASE_URL not set; records are kept in memory and lost on exit");
        }

        Ok(Self {
            port,
            database_url,
            allowed_origin,
        })
    }
}

fn port_from_env<E: Env>(env: &E) -> Result<u16, SettingsError> {
    let Some(value) = env.string(PORT_ENV) else {
        return Ok(DEFAULT_PORT);
    };
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(SettingsError::InvalidEnv {
            name: PORT_ENV,
            value,
            expected: "an integer between 1 and 65535",
        }),
    }
}

fn allowed_origin_from_env<E: Env>(env: &E) -> Result<String, SettingsError> {
    let Some(value) = env.string(CORS_ORIGIN_ENV) else {
        return Ok(DEFAULT_ALLOWED_ORIGIN.to_owned());
    };
    let invalid = || SettingsError::InvalidEnv {
        name: CORS_ORIGIN_ENV,
        value: value.clone(),
        expected: "an http(s) origin such as https://example.com",
    };

    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    // `Origin` headers carry no path, so serialise the origin alone.
    Ok(url.origin().ascii_serialization())
}

/// Seconds to wait for a pooled connection when `DB_POOL_CONNECTION_TIMEOUT_SECS`
/// is not set.
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Database connection pool sizing, loaded from `DB_POOL_*`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "DB_POOL")]
pub struct DatabasePoolSettings {
    /// Maximum number of pooled connections.
    pub max_size: Option<u32>,
    /// Idle connections kept open.
    pub min_idle: Option<u32>,
    /// Seconds to wait for a connection before failing a request.
    #[ortho_config(default = 30)]
    pub connection_timeout_secs: u64,
}

impl Default for DatabasePoolSettings {
    fn default() -> Self {
        Self {
            max_size: None,
            min_idle: None,
            connection_timeout_secs: DEFAULT_CONNECTION_TIMEOUT_SECS,
        }
    }
}
