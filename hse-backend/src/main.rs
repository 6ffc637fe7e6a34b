// src/main.rs
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hse_backend::api::handlers;
use hse_backend::api::AppState;
use hse_backend::config::Config;
use hse_backend::db::create_db_pool;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hse_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting HSE backend server...");

    let app_config = Config::from_env().expect("Failed to load configuration");

    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database pool created successfully.");

    let app_state = AppState::build(db_pool, &app_config).expect("Failed to build application state");
    let router = handlers::app_router(app_state);

    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
