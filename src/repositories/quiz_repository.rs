use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Client, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Question, Quiz, QuizWithQuestions},
};

/// Persistence for quizzes and their questions. A quiz and its question
/// set are written as one unit: a reader either sees the quiz with every
/// question or does not see the quiz at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create_with_questions(
        &self,
        quiz: Quiz,
        questions: Vec<Question>,
    ) -> AppResult<Quiz>;
    async fn find_with_questions(&self, id: &str) -> AppResult<Option<QuizWithQuestions>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    client: Client,
    quizzes: Collection<Quiz>,
    questions: Collection<Question>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            client: db.client().clone(),
            quizzes: db.get_collection("quizzes"),
            questions: db.get_collection("questions"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes and questions collections");

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let question_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let question_quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "order": 1 })
            .options(
                IndexOptions::builder()
                    .name("quiz_order".to_string())
                    .build(),
            )
            .build();

        self.quizzes.create_index(quiz_id_index).await?;
        self.questions.create_index(question_id_index).await?;
        self.questions.create_index(question_quiz_index).await?;

        log::info!("Successfully created indexes for quizzes and questions collections");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create_with_questions(
        &self,
        quiz: Quiz,
        questions: Vec<Question>,
    ) -> AppResult<Quiz> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        if let Err(err) = self.quizzes.insert_one(&quiz).session(&mut session).await {
            let _ = session.abort_transaction().await;
            return Err(err.into());
        }

        if !questions.is_empty() {
            if let Err(err) = self
                .questions
                .insert_many(&questions)
                .session(&mut session)
                .await
            {
                let _ = session.abort_transaction().await;
                return Err(err.into());
            }
        }

        session.commit_transaction().await?;
        Ok(quiz)
    }

    async fn find_with_questions(&self, id: &str) -> AppResult<Option<QuizWithQuestions>> {
        use futures::TryStreamExt;

        let Some(quiz) = self.quizzes.find_one(doc! { "id": id }).await? else {
            return Ok(None);
        };

        let questions: Vec<Question> = self
            .questions
            .find(doc! { "quiz_id": id })
            .sort(doc! { "order": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(Some(QuizWithQuestions { quiz, questions }))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        // Questions are owned by their quiz and go with it, in the same
        // transaction so no orphan set survives a partial failure.
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        if let Err(err) = self
            .questions
            .delete_many(doc! { "quiz_id": id })
            .session(&mut session)
            .await
        {
            let _ = session.abort_transaction().await;
            return Err(err.into());
        }

        let deleted = match self
            .quizzes
            .delete_one(doc! { "id": id })
            .session(&mut session)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                let _ = session.abort_transaction().await;
                return Err(err.into());
            }
        };

        if deleted.deleted_count == 0 {
            let _ = session.abort_transaction().await;
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                id
            )));
        }

        session.commit_transaction().await?;
        Ok(())
    }
}
