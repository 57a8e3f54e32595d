use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use crate::models::domain::AiProvider;

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: i32 = 1000;
const DEFAULT_QUESTION_COUNT: u32 = 5;
const DEFAULT_PASSING_SCORE: i16 = 70;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAiConfigRequest {
    pub provider: AiProvider,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 1))]
    pub credential: String,

    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f64>,

    #[validate(range(min = 1))]
    pub max_tokens: Option<i32>,

    pub active: Option<bool>,
}

impl CreateAiConfigRequest {
    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> i32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn active(&self) -> bool {
        self.active.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAiConfigRequest {
    pub provider: Option<AiProvider>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 1))]
    pub credential: Option<String>,

    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f64>,

    #[validate(range(min = 1))]
    pub max_tokens: Option<i32>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1))]
    pub lesson_id: String,

    #[validate(length(min = 1, max = 200))]
    pub lesson_title: String,

    #[validate(length(min = 1))]
    pub lesson_content: String,

    #[validate(range(min = 1, max = 20))]
    pub question_count: Option<u32>,

    #[validate(range(min = 0, max = 100))]
    pub passing_score: Option<i16>,
}

impl GenerateQuizRequest {
    pub fn question_count(&self) -> u32 {
        self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT)
    }

    pub fn passing_score(&self) -> i16 {
        self.passing_score.unwrap_or(DEFAULT_PASSING_SCORE)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuizRequest {
    // question id -> submitted answer; missing and unknown keys are
    // tolerated by grading, so no shape validation beyond deserialization
    pub answers: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config_request() -> CreateAiConfigRequest {
        CreateAiConfigRequest {
            provider: AiProvider::OpenAi,
            model: "gpt-4".to_string(),
            credential: "sk-test".to_string(),
            temperature: None,
            max_tokens: None,
            active: None,
        }
    }

    #[test]
    fn test_valid_create_config_request() {
        let request = valid_config_request();
        assert!(request.validate().is_ok());
        assert_eq!(request.temperature(), 0.7);
        assert_eq!(request.max_tokens(), 1000);
        assert!(!request.active());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let mut request = valid_config_request();
        request.temperature = Some(2.5);
        assert!(request.validate().is_err());

        request.temperature = Some(-0.1);
        assert!(request.validate().is_err());

        request.temperature = Some(2.0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_max_tokens_must_be_positive() {
        let mut request = valid_config_request();
        request.max_tokens = Some(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_credential_rejected() {
        let mut request = valid_config_request();
        request.credential = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_generate_request_defaults() {
        let request = GenerateQuizRequest {
            lesson_id: "lesson-1".to_string(),
            lesson_title: "HTML Basics".to_string(),
            lesson_content: "HTML stands for Hyper Text Markup Language.".to_string(),
            question_count: None,
            passing_score: None,
        };

        assert!(request.validate().is_ok());
        assert_eq!(request.question_count(), 5);
        assert_eq!(request.passing_score(), 70);
    }

    #[test]
    fn test_generate_request_rejects_empty_content() {
        let request = GenerateQuizRequest {
            lesson_id: "lesson-1".to_string(),
            lesson_title: "HTML Basics".to_string(),
            lesson_content: String::new(),
            question_count: Some(3),
            passing_score: Some(50),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_generate_request_rejects_zero_count() {
        let request = GenerateQuizRequest {
            lesson_id: "lesson-1".to_string(),
            lesson_title: "HTML Basics".to_string(),
            lesson_content: "content".to_string(),
            question_count: Some(0),
            passing_score: None,
        };

        assert!(request.validate().is_err());
    }
}
