pub mod ai_config_service;
pub mod model_service;
pub mod question_synthesizer;
pub mod quiz_attempt_service;
pub mod quiz_service;

pub use ai_config_service::AiConfigService;
pub use model_service::{CompletionClient, CompletionRequest, HttpModelService};
pub use question_synthesizer::QuestionSynthesizer;
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
