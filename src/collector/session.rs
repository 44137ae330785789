use std::path::{Path, PathBuf};

use super::client::{CertificateClient, SubmitError};
use super::draft::{Field, FormDraft};

/// Form state across submissions: the current draft, the last error shown to
/// the user, and where downloaded certificates are saved.
///
/// `submit` borrows the session mutably, so a second submission cannot start
/// until the first has settled.
pub struct FormSession {
    draft: FormDraft,
    error: Option<String>,
    download_dir: PathBuf,
}

impl FormSession {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            draft: FormDraft::default(),
            error: None,
            download_dir: download_dir.into(),
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update(&mut self, field: Field, value: impl Into<String>) {
        self.draft = self.draft.with(field, value);
    }

    /// Submits the draft and saves the returned certificate. On success the
    /// form is cleared; on failure the message is kept for display and the
    /// draft is left as it was.
    pub async fn submit(&mut self, client: &CertificateClient) -> Result<PathBuf, SubmitError> {
        self.error = None;

        let result = match client.submit(&self.draft).await {
            Ok(certificate) => save(&self.download_dir, &certificate.filename, &certificate.bytes).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(path) => {
                tracing::info!("Saved certificate to {}", path.display());
                self.draft = FormDraft::default();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }
}

async fn save(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, SubmitError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
