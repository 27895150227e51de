mod gemini;
mod prompt;
mod relay;

pub use gemini::{GeminiAgent, DEFAULT_GEMINI_URL};
pub use prompt::build_prompt;
pub use relay::{RelayAgent, MISSING_CREDENTIAL_CODE};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::certificate::{CertificateBody, CertificateRequest, FALLBACK_TEXT};
use crate::errors::GenerationError;

/// Anything that can write the paragraph for a certificate.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn generate(&self, request: &CertificateRequest) -> Result<String, GenerationError>;
}

/// Skips the network entirely and always yields the fallback paragraph.
pub struct OfflineSource;

#[async_trait]
impl TextSource for OfflineSource {
    async fn generate(&self, _request: &CertificateRequest) -> Result<String, GenerationError> {
        Ok(FALLBACK_TEXT.to_string())
    }
}

/// Outcome of text acquisition. `body` is always usable; `failure` records why
/// the fallback was used, if it was.
#[derive(Debug)]
pub struct Acquired {
    pub body: CertificateBody,
    pub failure: Option<GenerationError>,
}

/// Obtains the certificate paragraph. Never fails: every error path resolves
/// to [`FALLBACK_TEXT`].
pub async fn acquire(source: &dyn TextSource, request: &CertificateRequest) -> Acquired {
    match source.generate(request).await {
        Ok(text) => {
            let body = CertificateBody::new(&text);
            if body.is_fallback() && text.trim().is_empty() {
                warn!("Text service returned blank text for {}, using fallback", request.name);
                return Acquired {
                    body,
                    failure: Some(GenerationError::EmptyText),
                };
            }
            info!("Acquired certificate text for {} ({} chars)", request.name, body.as_str().len());
            Acquired { body, failure: None }
        }
        Err(e) => {
            warn!("Text generation failed for {}, using fallback: {}", request.name, e);
            Acquired {
                body: CertificateBody::fallback(),
                failure: Some(e),
            }
        }
    }
}
