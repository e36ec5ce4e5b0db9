//! Review endpoints (`reviews/`)

use serde_json::Value;
use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    models::{
        review::{CreateReview, UpdateReview},
        Review,
    },
};

use super::ApiClient;

const ROOT: &str = "reviews/";

#[derive(Clone)]
pub struct ReviewsApi {
    client: ApiClient,
}

impl ReviewsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, review: &CreateReview) -> ClientResult<Value> {
        review
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client.post(&format!("{}create/", ROOT), review).await
    }

    pub async fn for_clothing(&self, clothing_id: i64) -> ClientResult<Vec<Review>> {
        self.client
            .get(&format!("{}clothing/{}/", ROOT, clothing_id))
            .await
    }

    pub async fn mine(&self) -> ClientResult<Vec<Review>> {
        self.client.get(&format!("{}my/", ROOT)).await
    }

    pub async fn update(&self, id: i64, update: &UpdateReview) -> ClientResult<Value> {
        update
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .patch(&format!("{}{}/", ROOT, id), Some(update))
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let _: Option<Value> = self.client.delete(&format!("{}{}/", ROOT, id)).await?;
        Ok(())
    }
}
