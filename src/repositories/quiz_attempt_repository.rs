use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuizAttempt};

/// Append-only ledger of graded attempts. `insert` never overwrites or
/// deduplicates; every submission is retained as independent history.
/// List and aggregate queries are served off the `user_id` and `quiz_id`
/// indexes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn insert(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>>;
    async fn list_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>>;
    async fn best_score(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<f64>>;
    async fn passed_count(&self, quiz_id: &str) -> AppResult<u64>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_quiz".to_string())
                    .build(),
            )
            .build();

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_quiz_index).await?;
        self.collection.create_index(quiz_id_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn insert(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn list_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn best_score(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<f64>> {
        let best = self
            .collection
            .find_one(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .sort(doc! { "score": -1 })
            .await?;
        Ok(best.map(|attempt| attempt.score))
    }

    async fn passed_count(&self, quiz_id: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "quiz_id": quiz_id, "passed": true })
            .await?;
        Ok(count)
    }
}
