//! Customer/store conversations

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::{
    api::chat::ChatApi,
    error::ClientResult,
    models::{chat::SendMessage, Conversation, Message},
};

use super::poller::{PollFeed, PollHandle, Poller};

#[derive(Clone)]
pub struct ChatService {
    api: ChatApi,
    period: Duration,
}

impl ChatService {
    pub fn new(api: ChatApi, period: Duration) -> Self {
        Self { api, period }
    }

    pub async fn conversations(&self) -> ClientResult<Vec<Conversation>> {
        self.api.conversations().await
    }

    /// Open the conversation with a store and return its thread
    pub async fn start(&self, store_id: i64) -> ClientResult<ChatThread> {
        let conversation = self.api.start(store_id).await?;
        Ok(self.thread(conversation.id))
    }

    pub fn thread(&self, conversation_id: i64) -> ChatThread {
        ChatThread {
            api: self.api.clone(),
            conversation_id,
            period: self.period,
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Messages of one conversation
#[derive(Clone)]
pub struct ChatThread {
    api: ChatApi,
    conversation_id: i64,
    period: Duration,
    messages: Arc<Mutex<Vec<Message>>>,
}

impl ChatThread {
    pub fn conversation_id(&self) -> i64 {
        self.conversation_id
    }

    pub async fn load(&self) -> ClientResult<usize> {
        let messages = self.api.messages(self.conversation_id).await?;
        let count = messages.len();
        *self.cache() = messages;
        Ok(count)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.cache().clone()
    }

    /// Send `text`, then re-read the thread once
    pub async fn send(&self, text: impl Into<String>) -> ClientResult<Message> {
        let message = SendMessage { text: text.into() };
        let sent = self.api.send(self.conversation_id, &message).await?;
        if let Err(e) = self.load().await {
            tracing::warn!("Reloading conversation #{} failed: {}", self.conversation_id, e);
        }
        Ok(sent)
    }

    /// Poll the thread every period; each result also refreshes [`ChatThread::messages`]
    pub fn watch(&self) -> (PollHandle, PollFeed<Vec<Message>>) {
        let thread = self.clone();
        Poller::spawn("chat messages", self.period, move || {
            let thread = thread.clone();
            async move {
                let messages = thread.api.messages(thread.conversation_id).await?;
                *thread.cache() = messages.clone();
                Ok(messages)
            }
        })
    }

    fn cache(&self) -> MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
