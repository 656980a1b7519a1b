use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use hotel_api::{create_app, telemetry, AppState};
use hotel_shared::AppConfig;

/// How often expired and revoked refresh tokens are purged
const TOKEN_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging).context("Failed to install tracing subscriber")?;

    tracing::info!(
        environment = ?config.environment,
        database = ?config.database.backend,
        cache = ?config.cache.backend,
        "Starting hotel listing API"
    );

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let state = AppState::from_config(config)
        .await
        .context("Failed to initialize application state")?;
    let state = web::Data::new(state);

    spawn_token_cleanup(state.clone());

    let mut server = HttpServer::new({
        let state = state.clone();
        move || create_app(state.clone())
    });
    if workers > 0 {
        server = server.workers(workers);
    }

    tracing::info!(address = %bind_address, "Listening");
    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn spawn_token_cleanup(state: web::Data<AppState>) {
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(TOKEN_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match state.auth.token_service().cleanup_expired_tokens().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged stale refresh tokens"),
                Err(e) => tracing::warn!(error = %e, "Refresh token cleanup failed"),
            }
        }
    });
}
