use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{GradeResult, Question, QuizAttempt},
        dto::response::GradeResponse,
    },
    repositories::{QuizAttemptRepository, QuizRepository},
};

pub struct QuizAttemptService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn QuizAttemptRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
        }
    }

    /// Grade a submission against a quiz's answer key. Pure computation:
    /// a missing answer is wrong, an answer for a question the quiz does
    /// not contain is ignored, and an empty quiz can never be passed.
    pub fn grade(
        questions: &[Question],
        passing_score: i16,
        answers: &HashMap<String, String>,
    ) -> GradeResult {
        let total_questions = questions.len();
        if total_questions == 0 {
            return GradeResult {
                score: 0.0,
                passed: false,
                correct_count: 0,
                total_questions: 0,
            };
        }

        let correct_count = questions
            .iter()
            .filter(|question| {
                answers
                    .get(&question.id)
                    .is_some_and(|answer| *answer == question.correct_answer)
            })
            .count();

        let score = (correct_count as f64 / total_questions as f64) * 100.0;
        let passed = score >= f64::from(passing_score);

        GradeResult {
            score,
            passed,
            correct_count,
            total_questions,
        }
    }

    /// Submission flow: load the answer key, grade, append the attempt.
    /// Prior attempts are never touched; a resubmission is a new record.
    pub async fn submit(
        &self,
        quiz_id: &str,
        user_id: &str,
        answers: HashMap<String, String>,
    ) -> AppResult<GradeResponse> {
        let aggregate = self
            .quiz_repository
            .find_with_questions(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let grade = Self::grade(&aggregate.questions, aggregate.quiz.passing_score, &answers);
        let attempt = QuizAttempt::from_grade(quiz_id, user_id, &grade, answers);
        let attempt = self.attempt_repository.insert(attempt).await?;

        log::info!(
            "Recorded attempt '{}' on quiz '{}' by user '{}': {:.1}% ({})",
            attempt.id,
            quiz_id,
            user_id,
            grade.score,
            if grade.passed { "passed" } else { "failed" }
        );

        Ok(GradeResponse::new(attempt, grade))
    }

    pub async fn attempts_for_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>> {
        self.attempt_repository.list_for_user(user_id).await
    }

    pub async fn attempts_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        self.attempt_repository.list_for_quiz(quiz_id).await
    }

    pub async fn best_score(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<f64>> {
        self.attempt_repository.best_score(user_id, quiz_id).await
    }

    pub async fn passed_count(&self, quiz_id: &str) -> AppResult<u64> {
        self.attempt_repository.passed_count(quiz_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Quiz, QuizWithQuestions};
    use crate::repositories::quiz_attempt_repository::MockQuizAttemptRepository;
    use crate::repositories::quiz_repository::MockQuizRepository;

    fn make_question(id: &str, correct: &str, order: i16) -> Question {
        Question {
            id: id.to_string(),
            quiz_id: "quiz-1".to_string(),
            prompt: format!("Prompt {}", id),
            options: vec![correct.to_string(), "wrong".to_string()],
            correct_answer: correct.to_string(),
            explanation: String::new(),
            order,
            created_at: None,
        }
    }

    fn make_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|n| make_question(&format!("q-{}", n), "right", n as i16))
            .collect()
    }

    fn answers_for(questions: &[Question], correct: usize) -> HashMap<String, String> {
        questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let answer = if i < correct { "right" } else { "wrong" };
                (q.id.clone(), answer.to_string())
            })
            .collect()
    }

    #[test]
    fn seven_of_ten_meets_passing_score_boundary() {
        let questions = make_questions(10);
        let grade = QuizAttemptService::grade(&questions, 70, &answers_for(&questions, 7));

        assert_eq!(grade.score, 70.0);
        assert!(grade.passed);
        assert_eq!(grade.correct_count, 7);
        assert_eq!(grade.total_questions, 10);
    }

    #[test]
    fn six_of_ten_fails_below_passing_score() {
        let questions = make_questions(10);
        let grade = QuizAttemptService::grade(&questions, 70, &answers_for(&questions, 6));

        assert_eq!(grade.score, 60.0);
        assert!(!grade.passed);
    }

    #[test]
    fn empty_quiz_scores_zero_and_never_passes() {
        let grade = QuizAttemptService::grade(&[], 0, &HashMap::new());

        assert_eq!(grade.score, 0.0);
        assert!(!grade.passed);
        assert_eq!(grade.total_questions, 0);
    }

    #[test]
    fn missing_answers_count_as_wrong_not_as_errors() {
        let questions = make_questions(10);
        let mut answers = answers_for(&questions, 8);
        answers.remove("q-0");
        answers.remove("q-1");

        let grade = QuizAttemptService::grade(&questions, 70, &answers);

        assert_eq!(grade.correct_count, 6);
        assert_eq!(grade.total_questions, 10);
        assert_eq!(grade.score, 60.0);
    }

    #[test]
    fn unknown_question_ids_are_ignored() {
        let questions = make_questions(4);
        let mut answers = answers_for(&questions, 4);
        answers.insert("not-a-question".to_string(), "right".to_string());

        let grade = QuizAttemptService::grade(&questions, 50, &answers);

        assert_eq!(grade.correct_count, 4);
        assert_eq!(grade.total_questions, 4);
        assert_eq!(grade.score, 100.0);
    }

    #[test]
    fn answer_comparison_is_case_sensitive_without_trimming() {
        let questions = vec![make_question("q-0", "Right", 0)];
        let mut answers = HashMap::new();
        answers.insert("q-0".to_string(), "right".to_string());

        let grade = QuizAttemptService::grade(&questions, 50, &answers);
        assert_eq!(grade.correct_count, 0);

        answers.insert("q-0".to_string(), "Right ".to_string());
        let grade = QuizAttemptService::grade(&questions, 50, &answers);
        assert_eq!(grade.correct_count, 0);
    }

    #[test]
    fn fractional_scores_are_not_rounded() {
        let questions = make_questions(3);
        let grade = QuizAttemptService::grade(&questions, 70, &answers_for(&questions, 2));

        assert!((grade.score - 66.666_666_666_666_66).abs() < 1e-9);
        assert!(!grade.passed);
    }

    #[tokio::test]
    async fn submit_records_attempt_with_grade() {
        let questions = make_questions(2);
        let answers = answers_for(&questions, 2);

        let mut quiz_repo = MockQuizRepository::new();
        {
            let questions = questions.clone();
            quiz_repo.expect_find_with_questions().returning(move |_| {
                Ok(Some(QuizWithQuestions {
                    quiz: Quiz::new("Quiz", "desc", "lesson-1", 70),
                    questions: questions.clone(),
                }))
            });
        }

        let mut attempt_repo = MockQuizAttemptRepository::new();
        attempt_repo
            .expect_insert()
            .withf(|attempt| attempt.score == 100.0 && attempt.passed)
            .returning(|attempt| Ok(attempt));

        let service = QuizAttemptService::new(Arc::new(quiz_repo), Arc::new(attempt_repo));
        let response = service
            .submit("quiz-1", "user-1", answers)
            .await
            .expect("submit should succeed");

        assert_eq!(response.score, 100.0);
        assert!(response.passed);
        assert_eq!(response.attempt.user_id, "user-1");
    }

    #[tokio::test]
    async fn submit_unknown_quiz_is_not_found() {
        let mut quiz_repo = MockQuizRepository::new();
        quiz_repo.expect_find_with_questions().returning(|_| Ok(None));

        let service = QuizAttemptService::new(
            Arc::new(quiz_repo),
            Arc::new(MockQuizAttemptRepository::new()),
        );

        let result = service.submit("missing", "user-1", HashMap::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
