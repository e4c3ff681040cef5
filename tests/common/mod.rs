#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use interview_prep_backend::database::{AnswerStore, ForumStore, QuestionStore, UserStore};
use interview_prep_backend::error::{Error, Result};
use interview_prep_backend::models::answer::{Answer, AnswerWithQuestion, NewAnswer};
use interview_prep_backend::models::message::{Message, NewMessage};
use interview_prep_backend::models::question::{NewQuestion, Question, QuestionSummary};
use interview_prep_backend::models::thread::{NewThread, Thread};
use interview_prep_backend::models::user::{NewUser, ProfileUpdate, User};
use interview_prep_backend::services::forum_events::ForumEvents;
use interview_prep_backend::services::gemini_service::TextGenerator;
use interview_prep_backend::utils::token::TokenIssuer;
use interview_prep_backend::{routes, AppState, Backends};

/// Process-local stand-in for Postgres.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    questions: Mutex<Vec<Question>>,
    answers: Mutex<Vec<Answer>>,
    threads: Mutex<Vec<Thread>>,
}

impl MemoryStore {
    pub fn answer_count(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::Conflict("Email is already registered".into()));
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            profile_pic: None,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(pic) = update.profile_pic {
            user.profile_pic = Some(pic);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn insert(&self, question: NewQuestion) -> Result<Question> {
        let created = Question {
            id: Uuid::new_v4(),
            topic: question.topic,
            difficulty: question.difficulty,
            question_text: question.question_text,
            model_answer: question.model_answer,
            created_at: Utc::now(),
        };
        self.questions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Question>> {
        Ok(self.questions.lock().unwrap().iter().find(|q| q.id == id).cloned())
    }
}

#[async_trait]
impl AnswerStore for MemoryStore {
    async fn save(&self, answer: NewAnswer) -> Result<Answer> {
        let created = Answer {
            id: Uuid::new_v4(),
            user_id: answer.user_id,
            question_id: answer.question_id,
            user_answer: answer.user_answer,
            feedback: answer.feedback,
            score: answer.score,
            created_at: Utc::now(),
        };
        self.answers.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnswerWithQuestion>> {
        let questions = self.questions.lock().unwrap();
        let answers = self.answers.lock().unwrap();
        Ok(answers
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                let q = questions.iter().find(|q| q.id == a.question_id)?;
                Some(AnswerWithQuestion {
                    answer: a.clone(),
                    question: QuestionSummary::from(q),
                })
            })
            .collect())
    }
}

#[async_trait]
impl ForumStore for MemoryStore {
    async fn list_threads(&self) -> Result<Vec<Thread>> {
        let mut threads = self.threads.lock().unwrap().clone();
        threads.reverse();
        Ok(threads)
    }

    async fn find_thread(&self, id: Uuid) -> Result<Option<Thread>> {
        Ok(self.threads.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn create_thread(&self, thread: NewThread) -> Result<Thread> {
        let id = Uuid::new_v4();
        let created = Thread {
            id,
            title: thread.title,
            author: thread.author.clone(),
            created_at: Utc::now(),
            messages: vec![Message {
                id: Uuid::new_v4(),
                thread_id: id,
                text: thread.opening_message,
                author: thread.author,
                created_at: Utc::now(),
            }],
        };
        self.threads.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn append_message(&self, thread_id: Uuid, message: NewMessage) -> Result<Option<Message>> {
        let mut threads = self.threads.lock().unwrap();
        let Some(thread) = threads.iter_mut().find(|t| t.id == thread_id) else {
            return Ok(None);
        };
        let created = Message {
            id: Uuid::new_v4(),
            thread_id,
            text: message.text,
            author: message.author,
            created_at: Utc::now(),
        };
        thread.messages.push(created.clone());
        Ok(Some(created))
    }
}

/// Replays canned model replies in order; an exhausted script fails upstream.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(reply.to_string());
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Upstream("Gemini API error 503 Service Unavailable".into()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub generator: Arc<ScriptedGenerator>,
    pub events: ForumEvents,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let generator = Arc::new(ScriptedGenerator::default());
    let events = ForumEvents::default();
    let backends = Backends {
        users: store.clone(),
        questions: store.clone(),
        answers: store.clone(),
        forum: store.clone(),
        generator: generator.clone(),
    };
    let state = AppState::from_backends(backends, TokenIssuer::new("test_secret_key", 1), events.clone());
    TestApp {
        router: routes::router(state),
        store,
        generator,
        events,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, body)
    }

    /// Registers a fresh user and returns its bearer token.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "name": "Test User",
                    "email": email,
                    "password": "password123"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }
}
