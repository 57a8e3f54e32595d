use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Client, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::AiConfig,
};

/// Store of external model configurations. Implementations must guarantee
/// that after any interleaving of `insert`/`update`/`activate` calls the
/// store settles with at most one active configuration: the
/// deactivate-then-activate step is a single atomic unit, never two
/// unguarded writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiConfigRepository: Send + Sync {
    async fn insert(&self, config: AiConfig) -> AppResult<AiConfig>;
    async fn update(&self, config: AiConfig) -> AppResult<AiConfig>;
    async fn activate(&self, id: &str) -> AppResult<AiConfig>;
    async fn deactivate(&self, id: &str) -> AppResult<AiConfig>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AiConfig>>;
    async fn find_active(&self) -> AppResult<Option<AiConfig>>;
    async fn list(&self) -> AppResult<Vec<AiConfig>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoAiConfigRepository {
    client: Client,
    collection: Collection<AiConfig>,
}

impl MongoAiConfigRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("ai_configs");
        Self {
            client: db.client().clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for ai_configs collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let active_index = IndexModel::builder()
            .keys(doc! { "active": 1 })
            .options(IndexOptions::builder().name("active".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(active_index).await?;

        log::info!("Successfully created indexes for ai_configs collection");
        Ok(())
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("AI config with id '{}' not found", id))
    }
}

#[async_trait]
impl AiConfigRepository for MongoAiConfigRepository {
    async fn insert(&self, config: AiConfig) -> AppResult<AiConfig> {
        if !config.active {
            self.collection.insert_one(&config).await?;
            return Ok(config);
        }

        // Inserting as active must demote every other active config in the
        // same transaction, so no reader ever settles on two actives.
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        if let Err(err) = self
            .collection
            .update_many(doc! { "active": true }, doc! { "$set": { "active": false } })
            .session(&mut session)
            .await
        {
            let _ = session.abort_transaction().await;
            return Err(err.into());
        }

        if let Err(err) = self
            .collection
            .insert_one(&config)
            .session(&mut session)
            .await
        {
            let _ = session.abort_transaction().await;
            return Err(err.into());
        }

        session.commit_transaction().await?;
        Ok(config)
    }

    async fn update(&self, config: AiConfig) -> AppResult<AiConfig> {
        if !config.active {
            let result = self
                .collection
                .replace_one(doc! { "id": &config.id }, &config)
                .await?;
            if result.matched_count == 0 {
                return Err(Self::not_found(&config.id));
            }
            return Ok(config);
        }

        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        if let Err(err) = self
            .collection
            .update_many(
                doc! { "active": true, "id": { "$ne": &config.id } },
                doc! { "$set": { "active": false } },
            )
            .session(&mut session)
            .await
        {
            let _ = session.abort_transaction().await;
            return Err(err.into());
        }

        let replaced = match self
            .collection
            .replace_one(doc! { "id": &config.id }, &config)
            .session(&mut session)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                let _ = session.abort_transaction().await;
                return Err(err.into());
            }
        };

        if replaced.matched_count == 0 {
            let _ = session.abort_transaction().await;
            return Err(Self::not_found(&config.id));
        }

        session.commit_transaction().await?;
        Ok(config)
    }

    async fn activate(&self, id: &str) -> AppResult<AiConfig> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        if let Err(err) = self
            .collection
            .update_many(
                doc! { "active": true, "id": { "$ne": id } },
                doc! { "$set": { "active": false } },
            )
            .session(&mut session)
            .await
        {
            let _ = session.abort_transaction().await;
            return Err(err.into());
        }

        let updated = match self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "active": true } })
            .session(&mut session)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                let _ = session.abort_transaction().await;
                return Err(err.into());
            }
        };

        if updated.matched_count == 0 {
            let _ = session.abort_transaction().await;
            return Err(Self::not_found(id));
        }

        session.commit_transaction().await?;

        self.collection
            .find_one(doc! { "id": id })
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn deactivate(&self, id: &str) -> AppResult<AiConfig> {
        let updated = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "active": false } })
            .await?;

        if updated.matched_count == 0 {
            return Err(Self::not_found(id));
        }

        self.collection
            .find_one(doc! { "id": id })
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AiConfig>> {
        let config = self.collection.find_one(doc! { "id": id }).await?;
        Ok(config)
    }

    async fn find_active(&self) -> AppResult<Option<AiConfig>> {
        let config = self.collection.find_one(doc! { "active": true }).await?;
        Ok(config)
    }

    async fn list(&self) -> AppResult<Vec<AiConfig>> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?;
        let configs: Vec<AiConfig> = cursor.try_collect().await?;

        Ok(configs)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        // Deleting the active config deliberately leaves the store with no
        // active entry; nothing is auto-promoted in its place.
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
