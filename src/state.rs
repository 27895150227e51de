use crate::agents::GeminiAgent;
use crate::config::Config;
use crate::errors::GenerationError;
use crate::pdf::Composer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gemini: Arc<GeminiAgent>,
    pub composer: Arc<Composer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, GenerationError> {
        let gemini = GeminiAgent::new(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
            config.generation_timeout,
        )?;
        let composer = Composer::new(config.template_path.clone(), config.font_dir.clone());

        Ok(Self {
            gemini: Arc::new(gemini),
            composer: Arc::new(composer),
            config: Arc::new(config),
        })
    }
}
