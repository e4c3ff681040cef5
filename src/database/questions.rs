use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::question::{NewQuestion, Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn insert(&self, question: NewQuestion) -> Result<Question>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>>;
}

#[derive(Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn insert(&self, question: NewQuestion) -> Result<Question> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (topic, difficulty, question_text, model_answer)
            VALUES ($1, $2, $3, $4)
            RETURNING id, topic, difficulty, question_text, model_answer, created_at
            "#,
        )
        .bind(&question.topic)
        .bind(question.difficulty)
        .bind(&question.question_text)
        .bind(&question.model_answer)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, topic, difficulty, question_text, model_answer, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
