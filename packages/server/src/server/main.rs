// Main entry point for the donation API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::kernel::{BaseMailer, LogMailer, MailApiClient, ServerDeps};
use server_core::server::app::{build_app, AppState};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LifeDrop donation API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Mail relay is optional; without one, notifications are logged only.
    let mailer: Arc<dyn BaseMailer> = match config.mail_api_url.clone() {
        Some(url) => Arc::new(MailApiClient::new(url, config.mail_api_token.clone())),
        None => Arc::new(LogMailer),
    };

    let deps = Arc::new(ServerDeps::postgres(pool.clone(), mailer));

    let state = AppState {
        deps,
        db_pool: Some(pool),
        staff_api_token: config.staff_api_token.clone(),
    };

    let app = build_app(state, config.allowed_origins.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
