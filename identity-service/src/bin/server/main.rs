use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use identity_service::config::Config;
use identity_service::domain::identity::ports::IdentityServicePort;
use identity_service::domain::identity::service::IdentityService;
use identity_service::domain::todo::ports::TodoServicePort;
use identity_service::domain::todo::service::TodoService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryIdentityRepository;
use identity_service::outbound::repositories::InMemoryTodoRepository;
use identity_service::outbound::repositories::PostgresIdentityRepository;
use identity_service::outbound::repositories::PostgresTodoRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Failed to load configuration")?;
    let secret = config
        .signing_secret()
        .context("Invalid signing secret")?;
    let lifetimes = config
        .token_lifetimes()
        .context("Token lifetimes must be positive")?;
    let settings = config.identity_settings();

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.url.is_some(),
        access_token_minutes = config.jwt.access_token_minutes,
        refresh_token_days = config.jwt.refresh_token_days,
        hashing_timeout_ms = config.auth.hashing_timeout_ms,
        refresh_policy = ?settings.refresh_policy,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::with_lifetimes(&secret, lifetimes));

    let identity_service: Arc<dyn IdentityServicePort>;
    let todo_service: Arc<dyn TodoServicePort>;
    match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(MAX_DB_CONNECTIONS)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = MAX_DB_CONNECTIONS,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            identity_service = Arc::new(IdentityService::new(
                Arc::new(PostgresIdentityRepository::new(pg_pool.clone())),
                Arc::clone(&authenticator),
                settings,
            ));
            todo_service = Arc::new(TodoService::new(Arc::new(PostgresTodoRepository::new(
                pg_pool,
            ))));
        }
        None => {
            tracing::warn!("No database configured; identities and todos are kept in memory");
            identity_service = Arc::new(IdentityService::new(
                Arc::new(InMemoryIdentityRepository::new()),
                Arc::clone(&authenticator),
                settings,
            ));
            todo_service = Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::new())));
        }
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service, todo_service, authenticator);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
