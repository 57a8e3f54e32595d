use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// External model provider configuration. At most one document in the
/// store carries `active = true` at any settled instant; the repository
/// guards that invariant.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AiConfig {
    pub id: String,
    pub provider: AiProvider,
    pub model: String,
    pub credential: String, // opaque provider API key, masked in responses
    pub temperature: f64,
    pub max_tokens: i32,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAi,
    Anthropic,
    Google,
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::OpenAi => write!(f, "openai"),
            AiProvider::Anthropic => write!(f, "anthropic"),
            AiProvider::Google => write!(f, "google"),
        }
    }
}

impl AiConfig {
    pub fn new(
        provider: AiProvider,
        model: &str,
        credential: &str,
        temperature: f64,
        max_tokens: i32,
        active: bool,
    ) -> Self {
        AiConfig {
            id: Uuid::new_v4().to_string(),
            provider,
            model: model.to_string(),
            credential: credential.to_string(),
            temperature,
            max_tokens,
            active,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}
