//! Certificate generation pipeline.
//!
//! An explicit application service, called synchronously from the
//! session-completion handlers: render a fixed-layout PNG, stage it in a
//! temp file, upload it to the configured image store, and hand the URL back
//! so the caller can persist it on the completion row. No retries, no
//! background jobs; a failure anywhere surfaces to the HTTP layer as 500.
//!
//! - [`render`]: pure PNG rendering (1000x700 canvas).
//! - [`store`]: the [`store::CertificateStore`] trait with HTTP-upload and
//!   local-directory implementations.
//! - [`service`]: the orchestrating [`service::CertificateService`].

pub mod render;
pub mod service;
pub mod store;

pub use render::{CertificateData, CertificateFont};
pub use service::CertificateService;
pub use store::{CertificateStore, HttpImageStore, LocalImageStore};

use skillforge_core::types::DbId;

/// Error type for the certificate pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    /// The PNG could not be encoded or staged on disk.
    #[error("Certificate render error: {0}")]
    Render(String),

    /// Temp-file or filesystem failure.
    #[error("Certificate I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image-host upload failed at the transport level.
    #[error("Certificate upload error: {0}")]
    Upload(#[from] reqwest::Error),

    /// The image host answered with a non-success status or an unusable body.
    #[error("Image host rejected upload: {0}")]
    UploadRejected(String),

    /// A row needed for the certificate's display fields is missing.
    #[error("Missing {entity} with id {id} for certificate")]
    MissingEntity { entity: &'static str, id: DbId },

    /// Database failure while loading display fields.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
