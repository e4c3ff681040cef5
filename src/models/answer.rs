use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::question::QuestionSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub user_answer: String,
    pub feedback: String,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAnswer {
    pub user_id: Uuid,
    pub question_id: Uuid,
    pub user_answer: String,
    pub feedback: String,
    pub score: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnswerWithQuestion {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub answer: Answer,
    #[sqlx(flatten)]
    pub question: QuestionSummary,
}
