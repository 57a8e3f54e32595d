use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lesson_id: String,
    pub passing_score: i16, // percentage, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// A quiz together with its ordered questions, as read back for grading
/// and display. Questions are stored separately and joined on read.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizWithQuestions {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(title: &str, description: &str, lesson_id: &str, passing_score: i16) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            lesson_id: lesson_id.to_string(),
            passing_score,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_quiz_gets_id_and_timestamps() {
        let quiz = Quiz::new("HTML Basics Quiz", "Test your knowledge", "lesson-1", 70);

        assert!(!quiz.id.is_empty());
        assert_eq!(quiz.passing_score, 70);
        assert!(quiz.created_at.is_some());
    }

    #[test]
    fn quiz_round_trip_serialization() {
        let quiz = Quiz::new("CSS Quiz", "Selectors and layout", "lesson-2", 60);

        let json = serde_json::to_string(&quiz).expect("quiz should serialize");
        let parsed: Quiz = serde_json::from_str(&json).expect("quiz should deserialize");

        assert_eq!(quiz, parsed);
    }
}
