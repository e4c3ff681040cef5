pub mod auth_service;
pub mod chat_service;
pub mod eval_service;
pub mod feedback_parser;
pub mod forum_events;
pub mod forum_service;
pub mod gemini_service;
pub mod question_service;
