use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    AiConfig, AiProvider, GradeResult, Question, Quiz, QuizAttempt, QuizWithQuestions,
};

/// Admin-facing view of a provider configuration. The credential never
/// leaves the server in full.
#[derive(Debug, Clone, Serialize)]
pub struct AiConfigDto {
    pub id: String,
    pub provider: AiProvider,
    pub model: String,
    pub credential: String,
    pub temperature: f64,
    pub max_tokens: i32,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AiConfig> for AiConfigDto {
    fn from(config: AiConfig) -> Self {
        AiConfigDto {
            id: config.id,
            provider: config.provider,
            model: config.model,
            credential: mask_credential(&config.credential),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            active: config.active,
            created_at: config.created_at,
        }
    }
}

fn mask_credential(credential: &str) -> String {
    let visible: String = credential
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", visible)
}

/// Learner-facing question view: the correct answer and explanation stay
/// on the server.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub order: i16,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id,
            prompt: question.prompt,
            options: question.options,
            order: question.order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizDetailDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lesson_id: String,
    pub passing_score: i16,
    pub questions: Vec<QuestionDto>,
}

impl From<QuizWithQuestions> for QuizDetailDto {
    fn from(aggregate: QuizWithQuestions) -> Self {
        QuizDetailDto {
            id: aggregate.quiz.id,
            title: aggregate.quiz.title,
            description: aggregate.quiz.description,
            lesson_id: aggregate.quiz.lesson_id,
            passing_score: aggregate.quiz.passing_score,
            questions: aggregate
                .questions
                .into_iter()
                .map(QuestionDto::from)
                .collect(),
        }
    }
}

/// Authoring response: the freshly persisted quiz with full questions,
/// answer key included.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizResponse {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeResponse {
    pub attempt: QuizAttempt,
    pub score: f64,
    pub passed: bool,
    pub correct_count: usize,
    pub total_questions: usize,
}

impl GradeResponse {
    pub fn new(attempt: QuizAttempt, grade: GradeResult) -> Self {
        GradeResponse {
            attempt,
            score: grade.score,
            passed: grade.passed,
            correct_count: grade.correct_count,
            total_questions: grade.total_questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
