use std::sync::Arc;
use uuid::Uuid;

use crate::database::{AnswerStore, QuestionStore};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, AnswerWithQuestion, NewAnswer};
use crate::models::question::Question;
use crate::services::feedback_parser;
use crate::services::gemini_service::TextGenerator;

#[derive(Clone)]
pub struct EvalService {
    questions: Arc<dyn QuestionStore>,
    answers: Arc<dyn AnswerStore>,
    generator: Arc<dyn TextGenerator>,
}

impl EvalService {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        answers: Arc<dyn AnswerStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            questions,
            answers,
            generator,
        }
    }

    /// Scores one answer and stores the result. Nothing is written unless the
    /// model call succeeds.
    pub async fn evaluate(&self, question_id: Uuid, user_answer: &str, user_id: Uuid) -> Result<Answer> {
        if user_answer.trim().is_empty() {
            return Err(Error::BadRequest("User answer is required".to_string()));
        }

        let question = self
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| Error::NotFound("Question not found".to_string()))?;

        let prompt = build_evaluation_prompt(&question, user_answer);
        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::error!(%question_id, error = %e, "answer evaluation failed upstream");
            e
        })?;

        let parsed = feedback_parser::parse(&raw);
        if parsed.score.is_none() {
            tracing::warn!(%question_id, "model reply carried no usable score");
        }

        let stored = self
            .answers
            .save(NewAnswer {
                user_id,
                question_id,
                user_answer: user_answer.to_string(),
                feedback: parsed.feedback,
                score: parsed.score.map(i32::from),
            })
            .await?;

        tracing::info!(answer_id = %stored.id, %user_id, score = ?stored.score, "answer evaluated");
        Ok(stored)
    }

    /// The user's evaluated answers, newest first.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<AnswerWithQuestion>> {
        let mut records = self.answers.list_by_user(user_id).await?;
        records.sort_by(|a, b| b.answer.created_at.cmp(&a.answer.created_at));
        Ok(records)
    }
}

pub fn build_evaluation_prompt(question: &Question, user_answer: &str) -> String {
    format!(
        "Evaluate the following answer to an interview question on a scale of 0-10 and provide constructive feedback.\n\
         \n\
         Topic: {topic}\n\
         Difficulty: {difficulty}\n\
         Question: {question}\n\
         User's Answer: {answer}\n\
         \n\
         Respond in exactly this format:\n\
         Score: [0-10]\n\
         Feedback: [Detailed explanation of strengths and improvements]",
        topic = question.topic,
        difficulty = question.difficulty,
        question = question.question_text,
        answer = user_answer,
    )
}
