pub mod answers;
pub mod auth;
pub mod chat;
pub mod forum;
pub mod health;
pub mod questions;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::middleware::auth::require_bearer_auth;
use crate::AppState;

/// All HTTP routes. Transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/forum/threads", get(forum::list_threads))
        .route("/api/forum/threads/:id", get(forum::get_thread))
        .route("/api/forum/events", get(forum::events));

    let protected = Router::new()
        .route(
            "/api/auth/profile",
            get(auth::get_profile).put(auth::update_profile),
        )
        .route("/api/questions/generate", post(questions::generate_question))
        .route("/api/questions/:id", get(questions::get_question))
        .route("/api/answers/evaluate", post(answers::evaluate_answer))
        .route("/api/answers/mine", get(answers::list_my_answers))
        .route("/api/chat", post(chat::chat))
        .route("/api/forum/threads", post(forum::create_thread))
        .route("/api/forum/threads/:id/replies", post(forum::create_reply))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_bearer_auth,
        ));

    public.merge(protected).with_state(state)
}
