use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoAiConfigRepository, MongoQuizAttemptRepository, MongoQuizRepository},
    services::{
        AiConfigService, HttpModelService, QuestionSynthesizer, QuizAttemptService, QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub ai_config_service: Arc<AiConfigService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let ai_config_repository = Arc::new(MongoAiConfigRepository::new(&db));
        ai_config_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let model_client = Arc::new(HttpModelService::new(Duration::from_secs(
            config.model_request_timeout_secs,
        )));
        let synthesizer = Arc::new(QuestionSynthesizer::new(
            ai_config_repository.clone(),
            model_client,
        ));

        let ai_config_service = Arc::new(AiConfigService::new(ai_config_repository));
        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone(), synthesizer));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(
            quiz_repository,
            attempt_repository,
        ));

        Ok(Self {
            ai_config_service,
            quiz_service,
            quiz_attempt_service,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
