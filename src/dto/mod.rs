pub mod answer_dto;
pub mod auth_dto;
pub mod chat_dto;
pub mod forum_dto;
pub mod question_dto;
