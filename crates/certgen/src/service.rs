//! The certificate pipeline orchestrator.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use skillforge_db::models::session_completion::SessionCompletion;
use skillforge_db::repositories::{RegistrationRepo, TrainingSessionRepo, UserRepo};

use crate::render::{self, CertificateData, CertificateFont};
use crate::store::CertificateStore;
use crate::CertificateError;

/// Default font path when `CERT_FONT_PATH` is not set.
const DEFAULT_FONT_PATH: &str = "assets/fonts/DejaVuSans.ttf";

/// Renders, stages, and uploads completion certificates.
///
/// One instance lives in the application state; handlers call
/// [`generate`](Self::generate) synchronously within the request that marks
/// a completion finished.
pub struct CertificateService {
    store: Arc<dyn CertificateStore>,
    font_path: PathBuf,
}

impl CertificateService {
    pub fn new(store: Arc<dyn CertificateStore>, font_path: PathBuf) -> Self {
        Self { store, font_path }
    }

    /// Build with the font path from `CERT_FONT_PATH` (or the bundled
    /// default location).
    pub fn from_env(store: Arc<dyn CertificateStore>) -> Self {
        let font_path = std::env::var("CERT_FONT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONT_PATH));
        Self::new(store, font_path)
    }

    /// Run the full pipeline for `completion` and return the certificate URL.
    ///
    /// Loads the display fields (registration -> user, session -> trainer),
    /// renders the PNG, stages it in a temp file, and uploads it. The temp
    /// file is removed when it drops, whether or not the upload succeeded.
    /// The caller persists the returned URL on the completion row.
    pub async fn generate(
        &self,
        pool: &PgPool,
        completion: &SessionCompletion,
    ) -> Result<String, CertificateError> {
        let registration = RegistrationRepo::find_by_id(pool, completion.registration_id)
            .await?
            .ok_or(CertificateError::MissingEntity {
                entity: "Registration",
                id: completion.registration_id,
            })?;

        let user = UserRepo::find_by_id(pool, registration.user_id)
            .await?
            .ok_or(CertificateError::MissingEntity {
                entity: "User",
                id: registration.user_id,
            })?;

        let session = TrainingSessionRepo::find_by_id(pool, completion.training_session_id)
            .await?
            .ok_or(CertificateError::MissingEntity {
                entity: "TrainingSession",
                id: completion.training_session_id,
            })?;

        let trainer_name = match session.trainer_id {
            Some(trainer_id) => UserRepo::find_by_id(pool, trainer_id)
                .await?
                .map(|t| t.display_name()),
            None => None,
        };

        let data = CertificateData {
            recipient_name: user.display_name(),
            skill_name: session.skill_name.clone(),
            session_date: session.session_date,
            completed_on: completion
                .completed_at
                .unwrap_or_else(Utc::now)
                .date_naive(),
            trainer_name,
        };

        let font = CertificateFont::load(&self.font_path);
        let canvas = render::render_certificate(&data, &font);
        let png = render::encode_png(&canvas)?;

        // Stage in a temp file; dropped (and deleted) regardless of the
        // upload outcome.
        let mut temp = tempfile::Builder::new()
            .prefix("certificate-")
            .suffix(".png")
            .tempfile()?;
        temp.write_all(&png)?;
        temp.flush()?;

        let file_name = format!("certificate-{}.png", completion.id);
        let url = self.store.upload(temp.path(), &file_name).await?;

        tracing::info!(
            completion_id = completion.id,
            registration_id = completion.registration_id,
            url = %url,
            "Certificate generated and uploaded"
        );

        Ok(url)
    }
}
