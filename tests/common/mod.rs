#![allow(dead_code)]
//! Shared helpers for the integration tests.

use certifier::certificate::CertificateRequest;
use certifier::config::Config;
use certifier::pdf::FontSource;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("certifier=debug")
            .with_test_writer()
            .try_init();
    });
}

pub fn ada() -> CertificateRequest {
    CertificateRequest {
        name: "Ada Lovelace".into(),
        institution_name: "MIT".into(),
        institution_course: "CS101".into(),
        platform_course: "Intro to Algorithms".into(),
        manager_name: "J. Smith".into(),
        completion_date: "2025-12-27".into(),
    }
}

/// Writes a plain landscape PNG to stand in for the certificate artwork.
pub fn write_template(dir: &Path) -> PathBuf {
    let path = dir.join("certificate_template.png");
    image::RgbImage::from_pixel(842, 595, image::Rgb([250, 248, 240]))
        .save(&path)
        .expect("write template png");
    path
}

/// Rendering needs real font files. Tests that render call this first so a
/// host without fonts fails loudly instead of passing vacuously.
pub fn require_fonts() {
    if let Err(e) = FontSource::default().load() {
        panic!("rendering tests need Liberation, DejaVu or Arial fonts: {e}");
    }
}

pub fn test_config(gemini_url: &str, api_key: Option<&str>, template_path: PathBuf) -> Config {
    Config {
        gemini_api_key: api_key.map(str::to_string),
        gemini_api_url: gemini_url.to_string(),
        generation_timeout: Duration::from_secs(5),
        template_path,
        font_dir: None,
        output_folder: PathBuf::from("certificates"),
        host: "127.0.0.1".into(),
        port: 0,
    }
}

pub fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}
