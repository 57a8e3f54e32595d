use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz, QuizWithQuestions},
        dto::{request::GenerateQuizRequest, response::GenerateQuizResponse},
    },
    repositories::QuizRepository,
    services::question_synthesizer::QuestionSynthesizer,
};

const GENERATED_QUIZ_DESCRIPTION: &str = "Test your knowledge of this lesson";

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    synthesizer: Arc<QuestionSynthesizer>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, synthesizer: Arc<QuestionSynthesizer>) -> Self {
        Self {
            repository,
            synthesizer,
        }
    }

    /// Authoring flow: synthesize candidates from the lesson text, then
    /// persist the quiz and its questions as one unit.
    pub async fn generate_quiz(
        &self,
        request: GenerateQuizRequest,
    ) -> AppResult<GenerateQuizResponse> {
        request.validate()?;

        let candidates = self
            .synthesizer
            .synthesize(&request.lesson_content, request.question_count())
            .await?;

        let quiz = Quiz::new(
            &format!("{} Quiz", request.lesson_title),
            GENERATED_QUIZ_DESCRIPTION,
            &request.lesson_id,
            request.passing_score(),
        );

        // Question order mirrors the candidate sequence, zero-based.
        let questions: Vec<Question> = candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| Question {
                id: Uuid::new_v4().to_string(),
                quiz_id: quiz.id.clone(),
                prompt: candidate.question,
                options: candidate.options,
                correct_answer: candidate.correct_answer,
                explanation: candidate.explanation,
                order: index as i16,
                created_at: Some(Utc::now()),
            })
            .collect();

        let quiz = self
            .repository
            .create_with_questions(quiz, questions.clone())
            .await?;

        log::info!(
            "Generated quiz '{}' with {} questions for lesson '{}'",
            quiz.id,
            questions.len(),
            quiz.lesson_id
        );

        Ok(GenerateQuizResponse { quiz, questions })
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<QuizWithQuestions> {
        self.repository
            .find_with_questions(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("Deleted quiz '{}' and its questions", id);
        Ok(())
    }
}
