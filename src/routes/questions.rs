use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::question_dto::GenerateQuestionRequest;
use crate::error::{Error, Result};
use crate::models::question::{Difficulty, Question};
use crate::AppState;

#[axum::debug_handler]
pub async fn generate_question(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateQuestionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>)> {
    let Json(req) = payload?;
    req.validate()?;

    let topic = req.topic.unwrap_or_default();
    let difficulty: Difficulty = req
        .difficulty
        .unwrap_or_default()
        .parse()
        .map_err(Error::BadRequest)?;

    let question = state.question_service.generate(&topic, difficulty).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

#[axum::debug_handler]
pub async fn get_question(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Question>> {
    let Path(id) = path?;
    Ok(Json(state.question_service.get(id).await?))
}
