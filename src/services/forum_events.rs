//! In-process fan-out of forum activity to live subscribers.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::message::Message;
use crate::models::thread::Thread;

pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ForumEvent {
    ThreadCreated(Thread),
    ReplyCreated(Message),
}

impl ForumEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ForumEvent::ThreadCreated(_) => "thread_created",
            ForumEvent::ReplyCreated(_) => "reply_created",
        }
    }
}

/// Publish side of the forum event channel, owned by the application state.
#[derive(Clone)]
pub struct ForumEvents {
    sender: broadcast::Sender<ForumEvent>,
}

impl ForumEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Delivers to current subscribers only; having none is not an error.
    pub fn publish(&self, event: ForumEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!(event = name, receivers, "forum event published"),
            Err(_) => tracing::debug!(event = name, "forum event dropped, no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ForumEvent> {
        self.sender.subscribe()
    }
}

impl Default for ForumEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
