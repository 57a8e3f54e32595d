use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted multiple-choice question. Invariant: `correct_answer` is
/// exactly one element of `options`; the synthesizer enforces this before
/// anything reaches the repository.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub order: i16, // zero-based, unique within a quiz
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
