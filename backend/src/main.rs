//! Backend entry-point: reads settings, selects storage, and serves the
//! `/usuarios` API.

mod server;

use std::ffi::OsString;
use std::net::{Ipv4Addr, SocketAddr};

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use usuarios::outbound::persistence::{DbPool, PoolConfig};
use usuarios::settings::{AppSettings, DatabasePoolSettings};

/// Build the connection pool for `database_url`, applying `DB_POOL_*`
/// overrides.
async fn connect(database_url: &str) -> std::io::Result<DbPool> {
    let pool_settings = DatabasePoolSettings::load_from_iter([OsString::from("usuarios")])
        .map_err(|err| std::io::Error::other(format!("invalid pool settings: {err}")))?;
    let pool = DbPool::new(PoolConfig::from_settings(database_url, &pool_settings))
        .await
        .map_err(std::io::Error::other)?;
    info!(connections = pool.connections(), "database pool ready");
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port));

    let db_pool = match settings.database_url.as_deref() {
        Some(url) => Some(connect(url).await?),
        None => None,
    };

    let mut config = ServerConfig::new(bind_addr, settings.allowed_origin);
    if let Some(pool) = &db_pool {
        config = config.with_db_pool(pool.clone());
    }

    create_server(config)?.await?;

    if let Some(pool) = db_pool {
        info!(
            connections = pool.connections(),
            "server stopped; releasing database pool"
        );
        drop(pool);
    }
    Ok(())
}
