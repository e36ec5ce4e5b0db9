//! Donation endpoints (`donations/`)

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    lifecycle::{DonationAction, Scope},
    models::{
        donation::{CreateDonation, DonationStore, DonationStoreList, UpdateDonation},
        user::Ack,
        Donation,
    },
};

use super::{ApiClient, LifecycleEndpoint};

const ROOT: &str = "donations/";

#[derive(Clone)]
pub struct DonationsApi {
    client: ApiClient,
}

impl DonationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, scope: Scope) -> ClientResult<Vec<Donation>> {
        self.client
            .get(&format!("{}{}", ROOT, scope.segment()))
            .await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Donation> {
        self.client.get(&format!("{}{}/", ROOT, id)).await
    }

    pub async fn create(&self, donation: &CreateDonation) -> ClientResult<Donation> {
        donation
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .post(&format!("{}create/", ROOT), donation)
            .await
    }

    /// Edit a donation; the server only accepts this while it is Pending
    pub async fn update(&self, id: i64, changes: &UpdateDonation) -> ClientResult<Donation> {
        changes
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .patch(&format!("{}{}/update/", ROOT, id), Some(changes))
            .await
    }

    /// Stores accepting donations, for the donation form
    pub async fn stores(&self) -> ClientResult<Vec<DonationStore>> {
        let list: DonationStoreList = self.client.get(&format!("{}stores/", ROOT)).await?;
        Ok(list.stores)
    }

    pub async fn transition(&self, id: i64, action: DonationAction) -> ClientResult<Ack> {
        self.client.transition(ROOT, id, action).await
    }
}

#[async_trait]
impl LifecycleEndpoint for DonationsApi {
    type Entity = Donation;

    fn resource_name(&self) -> &'static str {
        "donations"
    }

    async fn list(&self, scope: Scope) -> ClientResult<Vec<Donation>> {
        DonationsApi::list(self, scope).await
    }

    async fn transition(&self, id: i64, action: DonationAction) -> ClientResult<Ack> {
        DonationsApi::transition(self, id, action).await
    }
}
