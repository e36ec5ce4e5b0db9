//! Chat endpoints (`chat/`)

use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    models::{chat::SendMessage, Conversation, Message},
};

use super::ApiClient;

const ROOT: &str = "chat/";

#[derive(Clone)]
pub struct ChatApi {
    client: ApiClient,
}

impl ChatApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn conversations(&self) -> ClientResult<Vec<Conversation>> {
        self.client.get(&format!("{}my/", ROOT)).await
    }

    /// Open (or reuse) the conversation between the customer and a store
    pub async fn start(&self, store_id: i64) -> ClientResult<Conversation> {
        self.client
            .post(&format!("{}start/{}/", ROOT, store_id), &serde_json::json!({}))
            .await
    }

    pub async fn messages(&self, conversation_id: i64) -> ClientResult<Vec<Message>> {
        self.client
            .get(&format!("{}{}/", ROOT, conversation_id))
            .await
    }

    pub async fn send(&self, conversation_id: i64, message: &SendMessage) -> ClientResult<Message> {
        message
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .post(&format!("{}{}/send/", ROOT, conversation_id), message)
            .await
    }
}
