use std::sync::Arc;

use skillforge_certgen::CertificateService;

use crate::config::ServerConfig;
use crate::mailer::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: skillforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Certificate rendering and upload pipeline.
    pub certificates: Arc<CertificateService>,
    /// SMTP mailer; `None` when SMTP is not configured. Handlers that send
    /// email fall back to logging the content.
    pub mailer: Option<Arc<Mailer>>,
}
