use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Failures while obtaining the certificate paragraph. These never leave
/// [`crate::agents::acquire`]; they only decide which fallback is used and
/// what gets logged.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Server missing API key")]
    MissingCredential,
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Request to text service failed: {0}")]
    Request(reqwest::Error),
    #[error("Text service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response shape: {0}")]
    Malformed(String),
    #[error("Text service returned no text")]
    EmptyText,
}

// Request URLs may carry credentials, so they are stripped before the error
// is displayed or logged.
impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err.without_url())
    }
}

impl GenerationError {
    /// Deployment defects are surfaced to the user instead of being papered
    /// over with fallback text.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GenerationError::MissingCredential)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
}

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Invalid completion date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Background image {path:?} could not be loaded: {source}")]
    Background {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Background image rejected by renderer: {0}")]
    BackgroundFormat(genpdf::error::Error),
    #[error("No suitable fonts found. Install: apt install fonts-liberation")]
    FontsUnavailable,
    #[error("PDF rendering failed: {0}")]
    Render(#[from] genpdf::error::Error),
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("A certificate is already being generated")]
    AlreadySubmitting,
    #[error(transparent)]
    Invalid(#[from] RequestError),
    #[error("Text generation is misconfigured: {0}")]
    Misconfigured(GenerationError),
    #[error(transparent)]
    Composition(#[from] CompositionError),
}

/// Error returned by HTTP handlers, rendered as a JSON `{ "error": ... }` body.
#[derive(Debug)]
pub struct AppError(SubmissionError);

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(err) = self;
        error!("Submission failed: {:?}", err);
        let status = match &err {
            SubmissionError::Invalid(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() }))).into_response()
    }
}
