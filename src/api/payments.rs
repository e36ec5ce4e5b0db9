//! Payment endpoints (`payments/`)

use crate::{
    error::ClientResult,
    models::payment::{InitiatePayment, PaymentInitiation},
};

use super::ApiClient;

const ROOT: &str = "payments/";

#[derive(Clone)]
pub struct PaymentsApi {
    client: ApiClient,
}

impl PaymentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Ask the backend to open a gateway transaction for a rental
    pub async fn initiate(&self, rental_id: i64) -> ClientResult<PaymentInitiation> {
        self.client
            .post(&format!("{}initiate/", ROOT), &InitiatePayment { rental_id })
            .await
    }
}
