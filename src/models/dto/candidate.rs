use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An unvalidated question as returned by the external model, in the wire
/// shape the prompt asks for. Items are accepted into the domain only
/// after `validation_error` returns `None`; invalid items are dropped,
/// never patched up.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl CandidateQuestion {
    /// Reason this candidate is unusable, or `None` if it is acceptable.
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.question.trim().is_empty() {
            return Some("empty question text");
        }
        if self.options.len() < 2 {
            return Some("fewer than two options");
        }
        // exact match, case-sensitive: a near-miss answer is a bad item,
        // not one to silently repair
        if !self.options.iter().any(|o| o == &self.correct_answer) {
            return Some("correct answer does not match any option");
        }
        None
    }
}
