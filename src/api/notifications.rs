//! Notification endpoints (`notifications/`)

use serde_json::Value;

use crate::{
    error::ClientResult,
    models::{notification::UnreadCount, Notification},
};

use super::ApiClient;

const ROOT: &str = "notifications/";

#[derive(Clone)]
pub struct NotificationsApi {
    client: ApiClient,
}

impl NotificationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Notification>> {
        self.client.get(ROOT).await
    }

    pub async fn unread_count(&self) -> ClientResult<u32> {
        let count: UnreadCount = self
            .client
            .get(&format!("{}unread-count/", ROOT))
            .await?;
        Ok(count.unread_count)
    }

    pub async fn mark_read(&self, id: i64) -> ClientResult<()> {
        let _: Option<Value> = self
            .client
            .patch::<Value, _>(&format!("{}{}/read/", ROOT, id), None)
            .await?;
        Ok(())
    }

    pub async fn mark_all_read(&self) -> ClientResult<()> {
        let _: Option<Value> = self
            .client
            .patch::<Value, _>(&format!("{}read-all/", ROOT), None)
            .await?;
        Ok(())
    }
}
