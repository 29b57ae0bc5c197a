//! Backend entry-point: loads settings, prepares the store and serves HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use facilities_backend::inbound::http::health::HealthState;
use facilities_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

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

    let settings =
        AppSettings::load().map_err(|e| std::io::Error::other(format!("settings: {e}")))?;

    let mut config =
        ServerConfig::new(settings.bind_addr()).with_request_timeout(settings.request_timeout());
    if let Some(url) = settings.database_url() {
        if settings.should_migrate {
            run_pending_migrations(url)
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
        }
        let pool = DbPool::new(
            PoolConfig::new(url)
                .with_max_size(settings.pool_max_size())
                .with_min_idle(Some(1)),
        )
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
        pool.ping()
            .await
            .map_err(|e| std::io::Error::other(format!("database unreachable: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_unhealthy();
            handle.stop(true).await;
        }
    });
    info!(addr = %settings.bind_addr(), "listening");
    server.await
}
