use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::TextSource;
use crate::certificate::CertificateRequest;
use crate::errors::GenerationError;

/// Diagnostic code the intermediary attaches when it has no upstream key.
pub const MISSING_CREDENTIAL_CODE: &str = "missing_credential";

#[derive(Debug, Deserialize)]
struct RelayText {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayError {
    code: Option<String>,
}

/// Fetches the paragraph through a `POST /api/generate-text` intermediary,
/// which holds the upstream credential.
pub struct RelayAgent {
    client: Client,
    url: String,
}

impl RelayAgent {
    pub fn new(url: String, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GenerationError::ClientBuild)?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl TextSource for RelayAgent {
    async fn generate(&self, request: &CertificateRequest) -> Result<String, GenerationError> {
        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let missing_key = serde_json::from_str::<RelayError>(&body)
                .ok()
                .and_then(|e| e.code)
                .is_some_and(|code| code == MISSING_CREDENTIAL_CODE);
            if missing_key {
                return Err(GenerationError::MissingCredential);
            }
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<RelayText>(&body)
            .map_err(|e| GenerationError::Malformed(e.to_string()))?
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyText)
    }
}
