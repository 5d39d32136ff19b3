use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        language_model::{LanguageModel, OpenAiLanguageModel},
        quiz_pipeline::QuizPipeline,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_pipeline: Arc<QuizPipeline>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let model = Arc::new(OpenAiLanguageModel::new(&config));
        Self::with_model(config, model)
    }

    /// Build state around any language model, e.g. a scripted one in tests.
    pub fn with_model(config: Config, model: Arc<dyn LanguageModel>) -> Self {
        let quiz_pipeline = Arc::new(QuizPipeline::new(model, config.limits));

        Self {
            quiz_pipeline,
            config: Arc::new(config),
        }
    }
}
