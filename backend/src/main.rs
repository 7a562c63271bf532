//! Shayari entry-point: loads settings, prepares storage and serves the site.

mod server;

use std::io;

use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shayari::inbound::http::session_config::{BuildMode, session_settings_from_env};
use shayari::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_process().map_err(io::Error::other)?;
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&DefaultEnv::new(), mode).map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );

    match settings.database_url.as_deref() {
        Some(url) => {
            let applied = run_pending_migrations(url)
                .await
                .map_err(io::Error::other)?;
            info!(applied, "database migrations up to date");
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| io::Error::other(err.into_message()))?;
            config = config.with_db_pool(pool);
        }
        None if mode == BuildMode::Debug => {
            warn!("SHAYARI_DATABASE_URL not set; using in-memory stores (dev only)");
        }
        None => {
            return Err(io::Error::other(
                "SHAYARI_DATABASE_URL is required in release builds",
            ));
        }
    }

    info!(%bind_addr, "starting server");
    create_server(config)?.await
}
