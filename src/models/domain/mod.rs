pub mod ai_config;
pub mod question;
pub mod quiz;
pub mod quiz_attempt;

pub use ai_config::{AiConfig, AiProvider};
pub use question::Question;
pub use quiz::{Quiz, QuizWithQuestions};
pub use quiz_attempt::{GradeResult, QuizAttempt};
