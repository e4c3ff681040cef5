//! Persistence. Each store is a trait so services can run against Postgres
//! in production and against mocks or in-memory stores in tests.

pub mod answers;
pub mod forum;
pub mod pool;
pub mod questions;
pub mod users;

pub use answers::{AnswerStore, PgAnswerStore};
pub use forum::{ForumStore, PgForumStore};
pub use questions::{PgQuestionStore, QuestionStore};
pub use users::{PgUserStore, UserStore};
