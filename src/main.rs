use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nutrition_api::config::{self, AppConfig};
use nutrition_api::database::{DatabaseManager, PgGateway};
use nutrition_api::AppState;

#[derive(Parser)]
#[command(name = "nutrition-api")]
#[command(about = "HTTP gateway for the nutrition database functions")]
#[command(version)]
struct Args {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides PORT / NUTRITION_API_PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, DB_HOST, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config: &AppConfig = config::config();
    tracing::info!("Starting Nutrition API in {:?} mode", config.environment);

    let schema = config
        .database
        .validated_schema()
        .context("invalid DATABASE_SCHEMA")?;
    let pool = DatabaseManager::connect(&config.database).context("failed to configure database pool")?;
    let gateway = PgGateway::new(pool.clone(), schema, config.database.query_timeout());
    let app = nutrition_api::app(AppState::new(Arc::new(gateway)), config);

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Nutrition API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
