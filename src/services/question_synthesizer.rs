use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    constants::quiz_prompt::build_quiz_generation_prompt,
    errors::{AppError, AppResult},
    models::dto::candidate::CandidateQuestion,
    repositories::AiConfigRepository,
    services::model_service::{CompletionClient, CompletionRequest},
};

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[a-zA-Z]*").expect("CODE_FENCE is a valid regex pattern"));

/// Turns lesson text into validated candidate questions via the active
/// provider configuration. The provider output is untrusted: every item
/// is parsed and checked individually, and bad items are dropped rather
/// than repaired.
pub struct QuestionSynthesizer {
    config_repository: Arc<dyn AiConfigRepository>,
    client: Arc<dyn CompletionClient>,
}

impl QuestionSynthesizer {
    pub fn new(
        config_repository: Arc<dyn AiConfigRepository>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config_repository,
            client,
        }
    }

    pub async fn synthesize(
        &self,
        lesson_content: &str,
        count: u32,
    ) -> AppResult<Vec<CandidateQuestion>> {
        if lesson_content.trim().is_empty() {
            return Err(AppError::Validation(
                "Lesson content cannot be empty".to_string(),
            ));
        }
        if count == 0 {
            return Err(AppError::Validation(
                "Question count must be at least 1".to_string(),
            ));
        }

        // The active configuration is read up front; no repository lock is
        // held while the seconds-scale provider call is in flight.
        let config = self.config_repository.find_active().await?.ok_or_else(|| {
            AppError::ConfigurationMissing(
                "configure an AI provider before generating questions".to_string(),
            )
        })?;

        let prompt = build_quiz_generation_prompt(lesson_content, count);
        let request = CompletionRequest::from_config(&config, prompt);
        let raw = self.client.complete(request).await?;

        let mut candidates = parse_candidates(&raw)?;

        if candidates.is_empty() {
            return Err(AppError::Synthesis(
                "model returned no usable questions".to_string(),
            ));
        }
        if candidates.len() > count as usize {
            candidates.truncate(count as usize);
        }
        if (candidates.len() as u32) < count {
            log::warn!(
                "Synthesis produced {} of {} requested questions; returning the valid subset",
                candidates.len(),
                count
            );
        }

        log::info!("Synthesized {} candidate questions", candidates.len());
        Ok(candidates)
    }
}

/// Parses the raw model reply into validated candidates. Items that fail
/// to deserialize or fail validation are dropped with a warning; a reply
/// with no JSON array at all is a synthesis failure.
fn parse_candidates(raw: &str) -> AppResult<Vec<CandidateQuestion>> {
    let cleaned = CODE_FENCE.replace_all(raw, "");
    let array_text = extract_json_array(&cleaned).ok_or_else(|| {
        AppError::Synthesis("model response did not contain a JSON array".to_string())
    })?;

    let items: Vec<serde_json::Value> = serde_json::from_str(array_text)
        .map_err(|err| AppError::Synthesis(format!("model response was not valid JSON: {}", err)))?;

    let mut candidates = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let candidate: CandidateQuestion = match serde_json::from_value(item) {
            Ok(candidate) => candidate,
            Err(err) => {
                log::warn!("Dropping malformed question at index {}: {}", index, err);
                continue;
            }
        };

        if let Some(reason) = candidate.validation_error() {
            log::warn!("Dropping invalid question at index {}: {}", index, reason);
            continue;
        }

        candidates.push(candidate);
    }

    Ok(candidates)
}

fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}
