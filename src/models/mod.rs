pub mod answer;
pub mod message;
pub mod question;
pub mod thread;
pub mod user;
