use std::sync::Arc;
use uuid::Uuid;

use crate::database::QuestionStore;
use crate::error::{Error, Result};
use crate::models::question::{Difficulty, NewQuestion, Question};
use crate::services::gemini_service::TextGenerator;

#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionStore>,
    generator: Arc<dyn TextGenerator>,
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            questions,
            generator,
        }
    }

    pub async fn generate(&self, topic: &str, difficulty: Difficulty) -> Result<Question> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::BadRequest("Topic is required".to_string()));
        }

        let reply = self
            .generator
            .generate(&build_generation_prompt(topic, difficulty))
            .await?;
        let question_text = reply.trim();
        if question_text.is_empty() {
            return Err(Error::Upstream("Model returned an empty question".to_string()));
        }

        let question = self
            .questions
            .insert(NewQuestion {
                topic: topic.to_string(),
                difficulty,
                question_text: question_text.to_string(),
                model_answer: None,
            })
            .await?;

        tracing::info!(question_id = %question.id, %difficulty, "question generated");
        Ok(question)
    }

    pub async fn get(&self, id: Uuid) -> Result<Question> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Question not found".to_string()))
    }
}

pub fn build_generation_prompt(topic: &str, difficulty: Difficulty) -> String {
    format!(
        "Generate a {} level interview question for the topic \"{}\".",
        difficulty, topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::questions::MockQuestionStore;
    use crate::services::gemini_service::MockTextGenerator;
    use chrono::Utc;

    #[tokio::test]
    async fn stores_trimmed_model_reply() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|p: &str| p == "Generate a Hard level interview question for the topic \"Databases\".")
            .times(1)
            .returning(|_| Ok("\n  Explain MVCC in PostgreSQL.  \n".to_string()));

        let mut questions = MockQuestionStore::new();
        questions
            .expect_insert()
            .withf(|q: &NewQuestion| {
                q.topic == "Databases"
                    && q.difficulty == Difficulty::Hard
                    && q.question_text == "Explain MVCC in PostgreSQL."
            })
            .times(1)
            .returning(|q| {
                Ok(Question {
                    id: Uuid::new_v4(),
                    topic: q.topic,
                    difficulty: q.difficulty,
                    question_text: q.question_text,
                    model_answer: q.model_answer,
                    created_at: Utc::now(),
                })
            });

        let svc = QuestionService::new(Arc::new(questions), Arc::new(generator));
        let q = svc.generate(" Databases ", Difficulty::Hard).await.unwrap();
        assert_eq!(q.question_text, "Explain MVCC in PostgreSQL.");
    }

    #[tokio::test]
    async fn empty_reply_is_an_upstream_error() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_| Ok("   ".to_string()));
        let mut questions = MockQuestionStore::new();
        questions.expect_insert().never();

        let svc = QuestionService::new(Arc::new(questions), Arc::new(generator));
        let err = svc.generate("Rust", Difficulty::Easy).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn missing_question_is_not_found() {
        let mut questions = MockQuestionStore::new();
        questions.expect_find_by_id().returning(|_| Ok(None));
        let svc = QuestionService::new(Arc::new(questions), Arc::new(MockTextGenerator::new()));
        assert!(matches!(svc.get(Uuid::new_v4()).await, Err(Error::NotFound(_))));
    }
}
