//! Backend entry-point: loads settings, prepares persistence, and serves the
//! catalogue API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, apply_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

async fn connect(settings: &ServerSettings, database_url: &str) -> std::io::Result<DbPool> {
    let applied = apply_pending_migrations(database_url.to_owned())
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(applied, "database schema is up to date");

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size);
    DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))
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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    let mut config =
        ServerConfig::new(bind_addr).with_dev_staff_token(settings.dev_staff_token.clone());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, database_url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting catalogue server");
    let server = create_server(health_state, config)?;
    server.await
}
