use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::AiConfig,
        dto::request::{CreateAiConfigRequest, UpdateAiConfigRequest},
    },
    repositories::AiConfigRepository,
};

pub struct AiConfigService {
    repository: Arc<dyn AiConfigRepository>,
}

impl AiConfigService {
    pub fn new(repository: Arc<dyn AiConfigRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_config(&self, request: CreateAiConfigRequest) -> AppResult<AiConfig> {
        request.validate()?;

        let config = AiConfig::new(
            request.provider,
            &request.model,
            &request.credential,
            request.temperature(),
            request.max_tokens(),
            request.active(),
        );

        let created = self.repository.insert(config).await?;
        log::info!(
            "Created AI config '{}' for provider {} (active: {})",
            created.id,
            created.provider,
            created.active
        );
        Ok(created)
    }

    pub async fn update_config(
        &self,
        id: &str,
        request: UpdateAiConfigRequest,
    ) -> AppResult<AiConfig> {
        request.validate()?;

        let mut config = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("AI config with id '{}' not found", id)))?;

        if let Some(provider) = request.provider {
            config.provider = provider;
        }
        if let Some(model) = request.model {
            config.model = model;
        }
        if let Some(credential) = request.credential {
            config.credential = credential;
        }
        if let Some(temperature) = request.temperature {
            config.temperature = temperature;
        }
        if let Some(max_tokens) = request.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(active) = request.active {
            config.active = active;
        }
        config.modified_at = Some(Utc::now());

        self.repository.update(config).await
    }

    pub async fn activate_config(&self, id: &str) -> AppResult<AiConfig> {
        let config = self.repository.activate(id).await?;
        log::info!("Activated AI config '{}' ({})", config.id, config.provider);
        Ok(config)
    }

    pub async fn deactivate_config(&self, id: &str) -> AppResult<AiConfig> {
        let config = self.repository.deactivate(id).await?;
        log::info!("Deactivated AI config '{}'", config.id);
        Ok(config)
    }

    pub async fn get_active(&self) -> AppResult<Option<AiConfig>> {
        self.repository.find_active().await
    }

    pub async fn list_configs(&self) -> AppResult<Vec<AiConfig>> {
        self.repository.list().await
    }

    pub async fn delete_config(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("Deleted AI config '{}'", id);
        Ok(())
    }
}
