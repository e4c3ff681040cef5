use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::dto::answer_dto::EvaluateAnswerRequest;
use crate::error::{Error, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::answer::{Answer, AnswerWithQuestion};
use crate::AppState;

#[axum::debug_handler]
pub async fn evaluate_answer(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    payload: std::result::Result<Json<EvaluateAnswerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Answer>)> {
    let Json(req) = payload?;
    let (Some(question_id), Some(user_answer)) = (req.question_id, req.user_answer) else {
        return Err(Error::BadRequest(
            "Question ID and user answer are required".to_string(),
        ));
    };

    let answer = state
        .eval_service
        .evaluate(question_id, &user_answer, user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

#[axum::debug_handler]
pub async fn list_my_answers(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<AnswerWithQuestion>>> {
    let history = state.eval_service.history(user_id).await?;
    Ok(Json(history))
}
