//! Clothing endpoints (`accounts/clothing/`)

use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    models::{
        clothing::{ClothingForm, ClothingStatusUpdate},
        enums::ClothingStatus,
        user::Ack,
        Clothing,
    },
};

use super::ApiClient;

const ROOT: &str = "accounts/clothing/";

#[derive(Clone)]
pub struct ClothingApi {
    client: ApiClient,
}

impl ClothingApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Public catalog
    pub async fn catalog(&self) -> ClientResult<Vec<Clothing>> {
        self.client.get(&format!("{}all/", ROOT)).await
    }

    /// Public listing detail
    pub async fn get(&self, id: i64) -> ClientResult<Clothing> {
        self.client.get(&format!("{}{}/", ROOT, id)).await
    }

    /// Listings of the signed-in store
    pub async fn mine(&self) -> ClientResult<Vec<Clothing>> {
        self.client.get(&format!("{}my/", ROOT)).await
    }

    pub async fn create(&self, form: &ClothingForm) -> ClientResult<Clothing> {
        form.validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client.post(&format!("{}create/", ROOT), form).await
    }

    pub async fn update(&self, id: i64, form: &ClothingForm) -> ClientResult<Clothing> {
        form.validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .put(&format!("{}{}/update/", ROOT, id), form)
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let _: Option<Ack> = self.client.delete(&format!("{}{}/delete/", ROOT, id)).await?;
        Ok(())
    }

    /// Availability toggle, the one status a store writes directly
    pub async fn set_status(&self, id: i64, status: ClothingStatus) -> ClientResult<()> {
        let body = ClothingStatusUpdate {
            clothing_status: status,
        };
        let _: Option<serde_json::Value> = self
            .client
            .patch(&format!("{}{}/status/", ROOT, id), Some(&body))
            .await?;
        Ok(())
    }
}
