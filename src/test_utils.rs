use crate::models::domain::{AiConfig, AiProvider, Question, Quiz};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard active OpenAI configuration
    pub fn test_config() -> AiConfig {
        AiConfig::new(AiProvider::OpenAi, "gpt-4", "sk-test", 0.7, 1000, true)
    }

    /// Creates a test quiz with a given passing score
    pub fn test_quiz(passing_score: i16) -> Quiz {
        Quiz::new("Test Quiz", "Test your knowledge", "lesson-1", passing_score)
    }

    /// Creates a question whose correct answer is its first option
    pub fn test_question(quiz_id: &str, id: &str, order: i16) -> Question {
        Question {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            prompt: format!("Prompt for {}", id),
            options: vec!["right".to_string(), "wrong".to_string()],
            correct_answer: "right".to_string(),
            explanation: "right is right".to_string(),
            order,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_config() {
        let config = test_config();
        assert!(config.active);
        assert_eq!(config.model, "gpt-4");
    }

    #[test]
    fn test_fixtures_test_question() {
        let question = test_question("quiz-1", "q-1", 0);
        assert_eq!(question.quiz_id, "quiz-1");
        assert!(question.options.contains(&question.correct_answer));
    }

    #[test]
    fn test_fixtures_test_quiz() {
        let quiz = test_quiz(70);
        assert_eq!(quiz.passing_score, 70);
        assert!(!quiz.id.is_empty());
    }
}
