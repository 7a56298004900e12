use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

use fuel_settlement::config::environment::EnvironmentConfig;
use fuel_settlement::database;
use fuel_settlement::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use fuel_settlement::routes;
use fuel_settlement::services::store::PgFuelStore;
use fuel_settlement::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = EnvironmentConfig::from_env();

    let pool = database::create_pool(None).await?;
    database::run_migrations(&pool).await?;

    let store = Arc::new(PgFuelStore::new(pool));
    let app_state = AppState::new(store, config.clone());

    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app = routes::create_api_router()
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("ctrl-c received, shutting down");
        },
        _ = terminate => {
            info!("terminate signal received, shutting down");
        },
    }
}
