#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Backend entry-point: loads configuration, prepares storage and serves the
//! hotel booking API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hotel_backend::domain::Registration;
use hotel_backend::inbound::http::health::HealthState;
use hotel_backend::inbound::http::session_config::{BuildMode, session_settings};
use hotel_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .await
        .wrap_err("failed to start HTTP server")?;
    info!(bind_addr = %settings.bind_addr(), "listening");
    server.await.wrap_err("HTTP server terminated with an error")
}

async fn build_server_config(settings: &ServerSettings) -> Result<ServerConfig> {
    let session = session_settings(
        &settings.session_toggles(),
        BuildMode::from_debug_assertions(),
    )
    .wrap_err("invalid session configuration")?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    );

    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations {
            let applied = run_pending_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
            info!(applied, "database migrations applied");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    if let Some((username, password)) = settings.bootstrap_admin() {
        let registration = Registration::try_from_parts(username, password)
            .map_err(|err| eyre!("invalid bootstrap admin credentials: {err}"))?;
        config = config.with_bootstrap_admin(registration);
    }

    Ok(config)
}
