//! Certificate storage backends.
//!
//! [`CertificateStore`] abstracts where the rendered PNG ends up so the
//! pipeline can target an external image host in production and a local
//! directory in development and tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::CertificateError;

/// Upload timeout for the external image host. A slow host fails the request
/// rather than stalling it indefinitely.
const UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Destination for rendered certificate images.
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Upload the staged PNG at `path` and return its public URL.
    async fn upload(&self, path: &Path, file_name: &str) -> Result<String, CertificateError>;
}

// ---------------------------------------------------------------------------
// HTTP image host
// ---------------------------------------------------------------------------

/// Uploads certificates to an external image host via multipart POST.
///
/// The host is expected to answer with JSON containing the public URL at
/// `data.url` (the common image-host response shape).
pub struct HttpImageStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: Option<String>,
}

impl HttpImageStore {
    /// Build a store for `upload_url`, optionally authenticating with
    /// `api_key` as a form field.
    pub fn new(upload_url: String, api_key: Option<String>) -> Result<Self, CertificateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            upload_url,
            api_key,
        })
    }

    /// Build from `CERT_UPLOAD_URL` / `CERT_UPLOAD_API_KEY`. Returns `None`
    /// when no upload URL is configured.
    pub fn from_env() -> Result<Option<Self>, CertificateError> {
        let Ok(upload_url) = std::env::var("CERT_UPLOAD_URL") else {
            return Ok(None);
        };
        let api_key = std::env::var("CERT_UPLOAD_API_KEY").ok();
        Ok(Some(Self::new(upload_url, api_key)?))
    }
}

#[async_trait]
impl CertificateStore for HttpImageStore {
    async fn upload(&self, path: &Path, file_name: &str) -> Result<String, CertificateError> {
        let bytes = tokio::fs::read(path).await?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/png")?;
        let mut form = reqwest::multipart::Form::new().part("image", part);
        if let Some(key) = &self.api_key {
            form = form.text("key", key.clone());
        }

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CertificateError::UploadRejected(format!(
                "HTTP {status} from image host"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        let url = body
            .pointer("/data/url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                CertificateError::UploadRejected("Response missing data.url".to_string())
            })?;

        Ok(url.to_string())
    }
}

// ---------------------------------------------------------------------------
// Local directory (dev / tests)
// ---------------------------------------------------------------------------

/// Copies certificates into a local directory and returns a URL under a
/// configured public base. Used when no image host is configured.
pub struct LocalImageStore {
    output_dir: PathBuf,
    public_base_url: String,
}

impl LocalImageStore {
    pub fn new(output_dir: PathBuf, public_base_url: String) -> Self {
        Self {
            output_dir,
            public_base_url,
        }
    }
}

#[async_trait]
impl CertificateStore for LocalImageStore {
    async fn upload(&self, path: &Path, file_name: &str) -> Result<String, CertificateError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let dest = self.output_dir.join(file_name);
        tokio::fs::copy(path, &dest).await?;
        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            file_name
        ))
    }
}
