//! Rental endpoints (`rentals/`)

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    lifecycle::{RentalAction, Scope},
    models::{
        rental::{CreateRental, CreatedRental},
        user::Ack,
        Rental,
    },
};

use super::{ApiClient, LifecycleEndpoint};

const ROOT: &str = "rentals/";

#[derive(Clone)]
pub struct RentalsApi {
    client: ApiClient,
}

impl RentalsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Rentals of the signed-in customer (`my/`) or addressed to the signed-in store (`store/`)
    pub async fn list(&self, scope: Scope) -> ClientResult<Vec<Rental>> {
        self.client
            .get(&format!("{}{}", ROOT, scope.segment()))
            .await
    }

    /// Submit a rental request; the backend prices it and starts it as pending
    pub async fn create(&self, rental: &CreateRental) -> ClientResult<CreatedRental> {
        rental
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .post(&format!("{}create/", ROOT), rental)
            .await
    }

    pub async fn transition(&self, id: i64, action: RentalAction) -> ClientResult<Ack> {
        self.client.transition(ROOT, id, action).await
    }
}

#[async_trait]
impl LifecycleEndpoint for RentalsApi {
    type Entity = Rental;

    fn resource_name(&self) -> &'static str {
        "rentals"
    }

    async fn list(&self, scope: Scope) -> ClientResult<Vec<Rental>> {
        RentalsApi::list(self, scope).await
    }

    async fn transition(&self, id: i64, action: RentalAction) -> ClientResult<Ack> {
        RentalsApi::transition(self, id, action).await
    }
}
