use std::sync::Arc;
use uuid::Uuid;

use crate::database::ForumStore;
use crate::error::{Error, Result};
use crate::models::message::{Message, NewMessage};
use crate::models::thread::{NewThread, Thread};
use crate::services::forum_events::{ForumEvent, ForumEvents};

#[derive(Clone)]
pub struct ForumService {
    store: Arc<dyn ForumStore>,
    events: ForumEvents,
}

impl ForumService {
    pub fn new(store: Arc<dyn ForumStore>, events: ForumEvents) -> Self {
        Self { store, events }
    }

    pub async fn list_threads(&self) -> Result<Vec<Thread>> {
        self.store.list_threads().await
    }

    pub async fn get_thread(&self, id: Uuid) -> Result<Thread> {
        self.store
            .find_thread(id)
            .await?
            .ok_or_else(|| Error::NotFound("Thread not found".to_string()))
    }

    pub async fn create_thread(&self, thread: NewThread) -> Result<Thread> {
        let created = self.store.create_thread(thread).await?;
        tracing::info!(thread_id = %created.id, "forum thread created");
        self.events.publish(ForumEvent::ThreadCreated(created.clone()));
        Ok(created)
    }

    pub async fn reply(&self, thread_id: Uuid, message: NewMessage) -> Result<Message> {
        let created = self
            .store
            .append_message(thread_id, message)
            .await?
            .ok_or_else(|| Error::NotFound("Thread not found".to_string()))?;
        self.events.publish(ForumEvent::ReplyCreated(created.clone()));
        Ok(created)
    }
}
