use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use super::draft::{Field, FormDraft};

const GENERIC_FAILURE: &str = "Failed to generate PDF";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please fill in: {}", labels(.0))]
    Incomplete(Vec<Field>),

    /// The API refused the request; holds the message it returned.
    #[error("{0}")]
    Rejected(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to save certificate: {0}")]
    Save(#[from] std::io::Error),
}

fn labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// A certificate returned by the API.
#[derive(Debug)]
pub struct DownloadedCertificate {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// HTTP client for `POST /generate-pdf`.
pub struct CertificateClient {
    client: Client,
    api_url: String,
}

impl CertificateClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, SubmitError> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/generate-pdf", self.api_url)
    }

    /// Sends the draft. An incomplete draft is refused before any request is
    /// made.
    pub async fn submit(&self, draft: &FormDraft) -> Result<DownloadedCertificate, SubmitError> {
        let missing = draft.missing();
        if !missing.is_empty() {
            return Err(SubmitError::Incomplete(missing));
        }

        let response = self.client.post(self.endpoint()).json(draft).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!("Certificate request rejected with {}: {}", status, message);
            return Err(SubmitError::Rejected(message));
        }

        let bytes = response.bytes().await?.to_vec();
        let filename = crate::storage::artifact_filename(chrono::Utc::now().timestamp_millis());
        info!("Received certificate ({} bytes)", bytes.len());

        Ok(DownloadedCertificate { filename, bytes })
    }
}
