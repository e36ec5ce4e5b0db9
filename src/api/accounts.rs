//! Account endpoints (`accounts/`): login, registration, OTP, profile,
//! customer dashboard feeds and nearby stores

use serde_json::Value;
use validator::Validate;

use crate::{
    error::{ClientError, ClientResult},
    models::{
        dashboard::{
            Activity, CurrentRental, Dashboard, DashboardStats, Listing, NearbyStore,
            NearbyStoreList,
        },
        enums::Role,
        user::{
            Ack, CustomerProfileUpdate, LoginRequest, LoginResponse, RegisterCustomer,
            RegisterStore, StoreProfileUpdate, VerifyOtp,
        },
    },
};

use super::ApiClient;

const ROOT: &str = "accounts/";

#[derive(Clone)]
pub struct AccountsApi {
    client: ApiClient,
}

impl AccountsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for tokens. Does not touch the session store.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        request
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client.post(&format!("{}login/", ROOT), request).await
    }

    pub async fn register_customer(&self, request: &RegisterCustomer) -> ClientResult<Ack> {
        request
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .post(&format!("{}register/customer/", ROOT), request)
            .await
    }

    pub async fn register_store(&self, request: &RegisterStore) -> ClientResult<Ack> {
        request
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .post(&format!("{}register/store/", ROOT), request)
            .await
    }

    pub async fn verify_otp(&self, request: &VerifyOtp) -> ClientResult<Ack> {
        request
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client
            .post(&format!("{}verify-otp/", ROOT), request)
            .await
    }

    /// Profile blob of the signed-in account; its shape differs per role
    pub async fn profile(&self, role: Role) -> ClientResult<Value> {
        self.client.get(&profile_path(role)).await
    }

    pub async fn update_customer_profile(&self, update: &CustomerProfileUpdate) -> ClientResult<Value> {
        update
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client.patch(&profile_path(Role::Customer), Some(update)).await
    }

    pub async fn update_store_profile(&self, update: &StoreProfileUpdate) -> ClientResult<Value> {
        update
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.client.patch(&profile_path(Role::Store), Some(update)).await
    }

    /// Stores to pin on the map
    pub async fn nearby_stores(&self) -> ClientResult<Vec<NearbyStore>> {
        let list: NearbyStoreList = self
            .client
            .get(&format!("{}stores/nearby/", ROOT))
            .await?;
        Ok(list.data)
    }

    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.client.get(&format!("{}dashboard/stats/", ROOT)).await
    }

    pub async fn current_rentals(&self) -> ClientResult<Vec<CurrentRental>> {
        let listing: Listing<CurrentRental> = self
            .client
            .get(&format!("{}rentals/current/", ROOT))
            .await?;
        Ok(listing.into_vec())
    }

    pub async fn recent_activity(&self) -> ClientResult<Vec<Activity>> {
        let listing: Listing<Activity> = self
            .client
            .get(&format!("{}activity/recent/", ROOT))
            .await?;
        Ok(listing.into_vec())
    }

    /// All three dashboard feeds. A feed that fails is logged and left
    /// empty; a rejected token still fails the whole call.
    pub async fn dashboard(&self) -> ClientResult<Dashboard> {
        let (stats, current, activity) = tokio::join!(
            self.dashboard_stats(),
            self.current_rentals(),
            self.recent_activity()
        );
        Ok(Dashboard {
            stats: optional_feed("dashboard/stats", stats)?,
            current_rentals: optional_feed("rentals/current", current)?,
            recent_activity: optional_feed("activity/recent", activity)?,
        })
    }
}

fn profile_path(role: Role) -> String {
    match role {
        Role::Customer => format!("{}customers/profile/", ROOT),
        Role::Store => format!("{}stores/profile/", ROOT),
    }
}

fn optional_feed<T: Default>(name: &str, result: ClientResult<T>) -> ClientResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_authentication() => Err(e),
        Err(e) => {
            tracing::debug!("Dashboard feed {} unavailable: {}", name, e);
            Ok(T::default())
        }
    }
}
