use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::message::{Message, NewMessage};
use crate::models::thread::{NewThread, Thread};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Newest thread first, each with its messages oldest first.
    async fn list_threads(&self) -> Result<Vec<Thread>>;
    async fn find_thread(&self, id: Uuid) -> Result<Option<Thread>>;
    /// Creates the thread and its opening message atomically.
    async fn create_thread(&self, thread: NewThread) -> Result<Thread>;
    /// Returns `None` when the thread does not exist.
    async fn append_message(&self, thread_id: Uuid, message: NewMessage) -> Result<Option<Message>>;
}

#[derive(Debug, FromRow)]
struct ThreadRow {
    id: Uuid,
    title: String,
    author: String,
    created_at: DateTime<Utc>,
}

impl ThreadRow {
    fn into_thread(self, messages: Vec<Message>) -> Thread {
        Thread {
            id: self.id,
            title: self.title,
            author: self.author,
            created_at: self.created_at,
            messages,
        }
    }
}

#[derive(Clone)]
pub struct PgForumStore {
    pool: PgPool,
}

impl PgForumStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn messages_for(&self, thread_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Message>>> {
        let rows = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, thread_id, text, author, created_at
            FROM forum_messages
            WHERE thread_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(thread_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Message>> = HashMap::new();
        for message in rows {
            grouped.entry(message.thread_id).or_default().push(message);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl ForumStore for PgForumStore {
    async fn list_threads(&self) -> Result<Vec<Thread>> {
        let rows = sqlx::query_as::<_, ThreadRow>(
            "SELECT id, title, author, created_at FROM forum_threads ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut messages = self.messages_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let thread_messages = messages.remove(&row.id).unwrap_or_default();
                row.into_thread(thread_messages)
            })
            .collect())
    }

    async fn find_thread(&self, id: Uuid) -> Result<Option<Thread>> {
        let row = sqlx::query_as::<_, ThreadRow>(
            "SELECT id, title, author, created_at FROM forum_threads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut messages = self.messages_for(&[id]).await?;
        Ok(Some(row.into_thread(messages.remove(&id).unwrap_or_default())))
    }

    async fn create_thread(&self, thread: NewThread) -> Result<Thread> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
            INSERT INTO forum_threads (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author, created_at
            "#,
        )
        .bind(&thread.title)
        .bind(&thread.author)
        .fetch_one(&mut *tx)
        .await?;

        let opening = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO forum_messages (thread_id, text, author)
            VALUES ($1, $2, $3)
            RETURNING id, thread_id, text, author, created_at
            "#,
        )
        .bind(row.id)
        .bind(&thread.opening_message)
        .bind(&thread.author)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into_thread(vec![opening]))
    }

    async fn append_message(&self, thread_id: Uuid, message: NewMessage) -> Result<Option<Message>> {
        let row = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO forum_messages (thread_id, text, author)
            SELECT $1, $2, $3
            WHERE EXISTS (SELECT 1 FROM forum_threads WHERE id = $1)
            RETURNING id, thread_id, text, author, created_at
            "#,
        )
        .bind(thread_id)
        .bind(&message.text)
        .bind(&message.author)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
