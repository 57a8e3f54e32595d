use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AiConfig, AiProvider},
};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// One outbound completion call, assembled from the active configuration.
/// The credential rides in a `SecretString` and is only exposed at the
/// point the request leaves the process.
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    pub provider: AiProvider,
    pub model: String,
    pub credential: SecretString,
    pub temperature: f64,
    pub max_tokens: i32,
    pub prompt: String,
}

impl CompletionRequest {
    pub fn from_config(config: &AiConfig, prompt: String) -> Self {
        CompletionRequest {
            provider: config.provider,
            model: config.model.clone(),
            credential: SecretString::from(config.credential.clone()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            prompt,
        }
    }
}

/// Boundary to the external completion capability. Transport failures,
/// non-success provider statuses, timeouts, and shape mismatches all come
/// back as `AppError::Synthesis`; callers decide whether to retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

pub struct HttpModelService {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpModelService {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
        }
    }

    async fn complete_openai(&self, request: &CompletionRequest) -> AppResult<String> {
        let config = OpenAIConfig::new().with_api_key(request.credential.expose_secret());
        let client = OpenAiClient::with_config(config);

        let body = json!({
            "model": request.model,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "messages": [{ "role": "user", "content": request.prompt }],
        });

        let response: serde_json::Value =
            tokio::time::timeout(self.timeout, client.chat().create_byot(body))
                .await
                .map_err(|_| AppError::Synthesis("completion request timed out".to_string()))?
                .map_err(|err| AppError::Synthesis(format!("OpenAI request failed: {}", err)))?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|text| text.to_string())
            .ok_or_else(|| {
                AppError::Synthesis("OpenAI response had no message content".to_string())
            })
    }

    async fn complete_anthropic(&self, request: &CompletionRequest) -> AppResult<String> {
        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .timeout(self.timeout)
            .header("x-api-key", request.credential.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": request.model,
                "max_tokens": request.max_tokens,
                "temperature": request.temperature,
                "messages": [{ "role": "user", "content": request.prompt }],
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::Synthesis(format!(
                "Anthropic returned status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(map_transport_error)?;

        body["content"][0]["text"]
            .as_str()
            .map(|text| text.to_string())
            .ok_or_else(|| {
                AppError::Synthesis("Anthropic response had no text content".to_string())
            })
    }

    async fn complete_google(&self, request: &CompletionRequest) -> AppResult<String> {
        let url = format!("{}/{}:generateContent", GOOGLE_API_BASE, request.model);

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", request.credential.expose_secret())
            .json(&json!({
                "contents": [{ "parts": [{ "text": request.prompt }] }],
                "generationConfig": {
                    "temperature": request.temperature,
                    "maxOutputTokens": request.max_tokens,
                },
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(AppError::Synthesis(format!(
                "Google returned status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(map_transport_error)?;

        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|text| text.to_string())
            .ok_or_else(|| AppError::Synthesis("Google response had no text content".to_string()))
    }
}

#[async_trait]
impl CompletionClient for HttpModelService {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        log::info!(
            "Requesting completion from {} model '{}'",
            request.provider,
            request.model
        );

        match request.provider {
            AiProvider::OpenAi => self.complete_openai(&request).await,
            AiProvider::Anthropic => self.complete_anthropic(&request).await,
            AiProvider::Google => self.complete_google(&request).await,
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Synthesis("completion request timed out".to_string())
    } else {
        AppError::Synthesis(format!("provider request failed: {}", err))
    }
}
