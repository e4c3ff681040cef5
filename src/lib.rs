pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::{
    AnswerStore, ForumStore, PgAnswerStore, PgForumStore, PgQuestionStore, PgUserStore,
    QuestionStore, UserStore,
};
use crate::error::{Error, Result};
use crate::services::{
    auth_service::AuthService,
    chat_service::ChatService,
    eval_service::EvalService,
    forum_events::ForumEvents,
    forum_service::ForumService,
    gemini_service::{GeminiClient, TextGenerator},
    question_service::QuestionService,
};
use crate::utils::token::TokenIssuer;
use reqwest::Client;
use sqlx::PgPool;

/// The storage and model handles the services are built from.
#[derive(Clone)]
pub struct Backends {
    pub users: Arc<dyn UserStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub answers: Arc<dyn AnswerStore>,
    pub forum: Arc<dyn ForumStore>,
    pub generator: Arc<dyn TextGenerator>,
}

#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenIssuer,
    pub auth_service: AuthService,
    pub question_service: QuestionService,
    pub eval_service: EvalService,
    pub chat_service: ChatService,
    pub forum_service: ForumService,
    pub forum_events: ForumEvents,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let generator = GeminiClient::new(
            http_client,
            config.gemini_api_key.clone(),
            &config.gemini_base_url,
            &config.gemini_model,
        );

        let backends = Backends {
            users: Arc::new(PgUserStore::new(pool.clone())),
            questions: Arc::new(PgQuestionStore::new(pool.clone())),
            answers: Arc::new(PgAnswerStore::new(pool.clone())),
            forum: Arc::new(PgForumStore::new(pool)),
            generator: Arc::new(generator),
        };
        let tokens = TokenIssuer::new(&config.jwt_secret, config.jwt_ttl_hours);

        Ok(Self::from_backends(backends, tokens, ForumEvents::default()))
    }

    pub fn from_backends(backends: Backends, tokens: TokenIssuer, forum_events: ForumEvents) -> Self {
        Self {
            auth_service: AuthService::new(backends.users, tokens.clone()),
            question_service: QuestionService::new(
                backends.questions.clone(),
                backends.generator.clone(),
            ),
            eval_service: EvalService::new(
                backends.questions,
                backends.answers,
                backends.generator.clone(),
            ),
            chat_service: ChatService::new(backends.generator),
            forum_service: ForumService::new(backends.forum, forum_events.clone()),
            forum_events,
            tokens,
        }
    }
}
