use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skillforge_api::config::ServerConfig;
use skillforge_api::mailer::{Mailer, MailerConfig};
use skillforge_api::router::build_app_router;
use skillforge_api::state::AppState;
use skillforge_certgen::{CertificateService, CertificateStore, HttpImageStore, LocalImageStore};

/// Default local directory for certificates when no image host is
/// configured.
const DEFAULT_CERT_OUTPUT_DIR: &str = "./certificates";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skillforge_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = skillforge_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    skillforge_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    skillforge_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Certificate pipeline ---
    // Prefer the HTTP image host; fall back to a local directory served by
    // the frontend proxy.
    let store: Arc<dyn CertificateStore> = match HttpImageStore::from_env()
        .expect("Invalid certificate upload configuration")
    {
        Some(http_store) => {
            tracing::info!("Certificate uploads via HTTP image host");
            Arc::new(http_store)
        }
        None => {
            let output_dir = std::env::var("CERT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CERT_OUTPUT_DIR));
            let base_url = format!("{}/certificates", config.app_url);
            tracing::info!(dir = %output_dir.display(), "Certificate uploads to local directory");
            Arc::new(LocalImageStore::new(output_dir, base_url))
        }
    };
    let certificates = Arc::new(CertificateService::from_env(store));

    // --- Mailer ---
    let mailer = MailerConfig::from_env().map(|cfg| Arc::new(Mailer::new(cfg)));
    match &mailer {
        Some(_) => tracing::info!("SMTP mailer configured"),
        None => tracing::warn!("SMTP not configured; emails will be logged instead"),
    }

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        certificates,
        mailer,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve when the process receives SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
