//! Sign-in, registration, profile and logout

use serde_json::Value;

use crate::{
    api::accounts::AccountsApi,
    error::{ClientError, ClientResult},
    models::{
        dashboard::{Dashboard, NearbyStore},
        enums::Role,
        user::{
            Ack, CustomerProfileUpdate, LoginRequest, RegisterCustomer, RegisterStore,
            StoreProfileUpdate, VerifyOtp,
        },
    },
    session::{Session, SessionStore},
};

#[derive(Clone)]
pub struct AuthService {
    accounts: AccountsApi,
    session: SessionStore,
}

impl AuthService {
    pub fn new(accounts: AccountsApi, session: SessionStore) -> Self {
        Self { accounts, session }
    }

    /// Log in and publish the new session to every subscriber
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.accounts.login(&request).await?;
        self.session.sign_in(response)
    }

    pub async fn register_customer(&self, request: &RegisterCustomer) -> ClientResult<Ack> {
        self.accounts.register_customer(request).await
    }

    pub async fn register_store(&self, request: &RegisterStore) -> ClientResult<Ack> {
        self.accounts.register_store(request).await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> ClientResult<Ack> {
        let request = VerifyOtp {
            email: email.trim().to_string(),
            otp: otp.trim().to_string(),
        };
        self.accounts.verify_otp(&request).await
    }

    fn signed_in_role(&self) -> ClientResult<Role> {
        self.session
            .role()
            .ok_or_else(|| ClientError::Authentication("Not signed in".to_string()))
    }

    fn require_role(&self, role: Role) -> ClientResult<()> {
        match self.signed_in_role()? {
            current if current == role => Ok(()),
            current => Err(ClientError::BadRequest(format!(
                "Signed in as {}, this needs a {} account",
                current, role
            ))),
        }
    }

    /// Profile of the signed-in account
    pub async fn profile(&self) -> ClientResult<Value> {
        let role = self.signed_in_role()?;
        self.accounts.profile(role).await
    }

    /// Save customer profile changes and return the re-read profile
    pub async fn update_customer_profile(&self, update: &CustomerProfileUpdate) -> ClientResult<Value> {
        self.require_role(Role::Customer)?;
        self.accounts.update_customer_profile(update).await?;
        tracing::info!("Customer profile updated");
        self.accounts.profile(Role::Customer).await
    }

    /// Save store profile changes and return the re-read profile
    pub async fn update_store_profile(&self, update: &StoreProfileUpdate) -> ClientResult<Value> {
        self.require_role(Role::Store)?;
        self.accounts.update_store_profile(update).await?;
        tracing::info!("Store profile updated");
        self.accounts.profile(Role::Store).await
    }

    pub async fn dashboard(&self) -> ClientResult<Dashboard> {
        self.require_role(Role::Customer)?;
        self.accounts.dashboard().await
    }

    pub async fn nearby_stores(&self) -> ClientResult<Vec<NearbyStore>> {
        self.accounts.nearby_stores().await
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()
    }
}
