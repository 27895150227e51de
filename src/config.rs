use std::path::PathBuf;
use std::time::Duration;

use crate::agents::DEFAULT_GEMINI_URL;
use crate::errors::ConfigError;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub generation_timeout: Duration,
    pub template_path: PathBuf,
    pub font_dir: Option<PathBuf>,
    pub output_folder: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        // Absent key is allowed at startup; requests report it.
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let gemini_api_url =
            std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string());

        let generation_timeout = match std::env::var("GENERATION_TIMEOUT_SECS") {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "GENERATION_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            Err(_) => Duration::from_secs(20),
        };

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let template_path = base_dir.join(
            std::env::var("CERTIFICATE_TEMPLATE")
                .unwrap_or_else(|_| "static/certificate_template.png".to_string()),
        );
        let font_dir = std::env::var("CERTIFICATE_FONT_DIR").ok().map(PathBuf::from);
        let output_folder = base_dir.join(
            std::env::var("OUTPUT_FOLDER").unwrap_or_else(|_| "certificates".to_string()),
        );

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse()
            .unwrap_or(5001);

        Ok(Self {
            gemini_api_key,
            gemini_api_url,
            generation_timeout,
            template_path,
            font_dir,
            output_folder,
            host,
            port,
        })
    }
}
