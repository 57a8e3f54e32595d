use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One graded submission. Attempts are append-only: a resubmission
/// creates a new record and never touches prior ones.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: f64, // raw percentage, unrounded
    pub answers: HashMap<String, String>, // question id -> submitted answer
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of grading one submission against a quiz's answer key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradeResult {
    pub score: f64,
    pub passed: bool,
    pub correct_count: usize,
    pub total_questions: usize,
}

impl QuizAttempt {
    pub fn from_grade(
        quiz_id: &str,
        user_id: &str,
        grade: &GradeResult,
        answers: HashMap<String, String>,
    ) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            user_id: user_id.to_string(),
            score: grade.score,
            answers,
            passed: grade.passed,
            submitted_at: Utc::now(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_grade(score: f64, passed: bool) -> GradeResult {
        GradeResult {
            score,
            passed,
            correct_count: 7,
            total_questions: 10,
        }
    }

    #[test]
    fn attempt_from_grade_carries_score_and_verdict() {
        let mut answers = HashMap::new();
        answers.insert("q-1".to_string(), "<a>".to_string());

        let attempt = QuizAttempt::from_grade("quiz-1", "user-1", &make_grade(70.0, true), answers);

        assert_eq!(attempt.quiz_id, "quiz-1");
        assert_eq!(attempt.user_id, "user-1");
        assert_eq!(attempt.score, 70.0);
        assert!(attempt.passed);
        assert_eq!(attempt.answers.get("q-1").map(String::as_str), Some("<a>"));
    }

    #[test]
    fn attempts_from_same_grade_are_distinct_records() {
        let grade = make_grade(60.0, false);
        let a = QuizAttempt::from_grade("quiz-1", "user-1", &grade, HashMap::new());
        let b = QuizAttempt::from_grade("quiz-1", "user-1", &grade, HashMap::new());

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn attempt_round_trip_serialization_preserves_answers_map() {
        let mut answers = HashMap::new();
        answers.insert("q-1".to_string(), "True".to_string());
        answers.insert("q-2".to_string(), "False".to_string());

        let attempt =
            QuizAttempt::from_grade("quiz-1", "user-1", &make_grade(50.0, false), answers);

        let json = serde_json::to_string(&attempt).expect("attempt should serialize");
        let parsed: QuizAttempt = serde_json::from_str(&json).expect("attempt should deserialize");

        assert_eq!(parsed.answers.len(), 2);
        assert_eq!(parsed.score, 50.0);
        assert!(!parsed.passed);
    }
}
