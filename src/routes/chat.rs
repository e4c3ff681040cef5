use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::dto::chat_dto::{ChatRequest, ChatResponse};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(req) = payload?;
    let message = req.user_message.unwrap_or_default();
    let reply = state.chat_service.reply(&message).await?;
    Ok(Json(ChatResponse { reply }))
}
