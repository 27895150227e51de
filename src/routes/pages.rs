use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tera::Context;

use crate::certificate::CertificateRequest;
use crate::errors::AppError;
use crate::pdf::RenderedCertificate;
use crate::state::AppState;
use crate::submission::{submit, Trigger, BUSY_LABEL, IDLE_LABEL};

pub async fn index() -> impl IntoResponse {
    let mut ctx = Context::new();
    ctx.insert("today", &chrono::Local::now().format("%Y-%m-%d").to_string());
    ctx.insert("idle_label", IDLE_LABEL);
    ctx.insert("busy_label", BUSY_LABEL);
    render_template("index.html", ctx)
}

/// Request body read as JSON when the client says so, as a urlencoded form
/// otherwise.
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        }
    }
}

/// Form submission: acquire the paragraph, compose the page and hand the PDF
/// back as a download.
pub async fn generate_certificate(
    State(state): State<Arc<AppState>>,
    FormOrJson(request): FormOrJson<CertificateRequest>,
) -> Result<Response, AppError> {
    let mut trigger = Trigger::new();
    let certificate = submit(
        &mut trigger,
        state.gemini.as_ref(),
        state.composer.as_ref(),
        request,
    )
    .await?;
    Ok(attachment(certificate))
}

fn attachment(certificate: RenderedCertificate) -> Response {
    let mime = mime_guess::from_path(&certificate.filename)
        .first_raw()
        .unwrap_or("application/octet-stream");
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", certificate.filename),
            ),
        ],
        certificate.bytes,
    )
        .into_response()
}

fn render_template(name: &str, ctx: Context) -> Html<String> {
    let tera = crate::templates::get_tera();
    let rendered = tera
        .render(name, &ctx)
        .unwrap_or_else(|_| format!("Template error: {}", name));
    Html(rendered)
}
