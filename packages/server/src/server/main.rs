// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use mailer::{MailerOptions, MailerService};
use server_core::domains::auth::JwtService;
use server_core::kernel::{start_scheduler, MailerAdapter};
use server_core::server::build_app;
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

    tracing::info!("Starting Project Sprint API");

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

    // SMTP delivery client
    let mailer_service = MailerService::new(MailerOptions {
        host: config.smtp_host.clone(),
        port: config.smtp_port,
        username: config.smtp_user.clone(),
        password: config.smtp_pass.clone(),
        from_address: config.email_from.clone(),
    })
    .context("Failed to create SMTP client")?;
    let mailer = Arc::new(MailerAdapter::new(Arc::new(mailer_service)));

    // JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.access_token_ttl_minutes,
    ));

    // Background OTP retention sweep
    let _scheduler = start_scheduler(pool.clone())
        .await
        .context("Failed to start scheduled tasks")?;

    // Build application
    let app = build_app(pool, mailer, jwt_service, config.allowed_origins.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
