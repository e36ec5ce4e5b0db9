//! Wishlist endpoints (`accounts/wishlist/`)

use serde_json::Value;

use crate::{
    error::ClientResult,
    models::wishlist::{AddToWishlist, WishlistPayload},
};

use super::ApiClient;

const ROOT: &str = "accounts/wishlist/";

#[derive(Clone)]
pub struct WishlistApi {
    client: ApiClient,
}

impl WishlistApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Clothing ids currently on the wishlist
    pub async fn list(&self) -> ClientResult<Vec<i64>> {
        let payload: WishlistPayload = self.client.get(ROOT).await?;
        Ok(payload
            .into_entries()
            .iter()
            .filter_map(|entry| entry.clothing_id())
            .collect())
    }

    pub async fn add(&self, clothing_id: i64) -> ClientResult<()> {
        let _: Option<Value> = self
            .client
            .post(&format!("{}add/", ROOT), &AddToWishlist { clothing_id })
            .await?;
        Ok(())
    }

    pub async fn remove(&self, clothing_id: i64) -> ClientResult<()> {
        let _: Option<Value> = self
            .client
            .delete(&format!("{}remove-by-clothing/{}/", ROOT, clothing_id))
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> ClientResult<()> {
        let _: Option<Value> = self.client.delete(&format!("{}clear/", ROOT)).await?;
        Ok(())
    }
}
