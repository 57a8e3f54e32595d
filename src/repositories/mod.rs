pub mod ai_config_repository;
pub mod quiz_attempt_repository;
pub mod quiz_repository;

pub use ai_config_repository::{AiConfigRepository, MongoAiConfigRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
