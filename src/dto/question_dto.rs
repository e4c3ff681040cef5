use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionRequest {
    #[validate(required, length(min = 1, max = 200))]
    pub topic: Option<String>,
    #[validate(required)]
    pub difficulty: Option<String>,
}
