use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::answer::{Answer, AnswerWithQuestion, NewAnswer};

/// Append-only store of evaluated answers; no update or delete exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Persists the record; the store assigns `id` and `created_at`.
    async fn save(&self, answer: NewAnswer) -> Result<Answer>;
    /// All answers of one user, newest first, with question text joined in.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnswerWithQuestion>>;
}

#[derive(Clone)]
pub struct PgAnswerStore {
    pool: PgPool,
}

impl PgAnswerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerStore for PgAnswerStore {
    async fn save(&self, answer: NewAnswer) -> Result<Answer> {
        let row = sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (user_id, question_id, user_answer, feedback, score)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, question_id, user_answer, feedback, score, created_at
            "#,
        )
        .bind(answer.user_id)
        .bind(answer.question_id)
        .bind(&answer.user_answer)
        .bind(&answer.feedback)
        .bind(answer.score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Error::NotFound("Question not found".to_string())
            }
            other => other.into(),
        })?;

        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnswerWithQuestion>> {
        let rows = sqlx::query_as::<_, AnswerWithQuestion>(
            r#"
            SELECT a.id, a.user_id, a.question_id, a.user_answer, a.feedback, a.score, a.created_at,
                   q.topic, q.difficulty, q.question_text
            FROM answers a
            JOIN questions q ON q.id = a.question_id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
