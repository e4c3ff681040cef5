use std::convert::Infallible;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use uuid::Uuid;
use validator::Validate;

use crate::dto::forum_dto::{CreateReplyRequest, CreateThreadRequest};
use crate::error::Result;
use crate::models::message::Message;
use crate::models::thread::Thread;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_threads(State(state): State<AppState>) -> Result<Json<Vec<Thread>>> {
    Ok(Json(state.forum_service.list_threads().await?))
}

#[axum::debug_handler]
pub async fn get_thread(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Thread>> {
    let Path(id) = path?;
    Ok(Json(state.forum_service.get_thread(id).await?))
}

#[axum::debug_handler]
pub async fn create_thread(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateThreadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Thread>)> {
    let Json(req) = payload?;
    req.validate()?;
    let thread = state.forum_service.create_thread(req.into()).await?;
    Ok((StatusCode::CREATED, Json(thread)))
}

#[axum::debug_handler]
pub async fn create_reply(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
    payload: std::result::Result<Json<CreateReplyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>)> {
    let Path(id) = path?;
    let Json(req) = payload?;
    req.validate()?;
    let message = state.forum_service.reply(id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Live `thread_created` / `reply_created` events as Server-Sent Events.
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.forum_events.subscribe()).filter_map(|item| match item {
        Ok(event) => match Event::default().event(event.name()).json_data(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode forum event");
                None
            }
        },
        Err(lagged) => {
            tracing::warn!(error = %lagged, "forum event subscriber lagged");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
