use serde::Deserialize;
use uuid::Uuid;

/// Both fields are optional at the JSON level so a missing one is a 400, not a 422.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateAnswerRequest {
    #[serde(default)]
    pub question_id: Option<Uuid>,
    #[serde(default)]
    pub user_answer: Option<String>,
}
