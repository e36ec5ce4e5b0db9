//! User, authentication and profile types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::Role;

/// User summary returned alongside tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

/// Login request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

/// Customer registration request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterCustomer {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 30))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30))]
    pub last_name: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Store registration request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterStore {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub store_name: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// OTP verification request sent after registration
#[derive(Debug, Clone, Serialize, Validate)]
pub struct VerifyOtp {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, max = 8))]
    pub otp: String,
}

/// Generic `{"message": ..}` acknowledgement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Customer profile edit (`PATCH customers/profile/`); unset fields are left alone
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CustomerProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_clothing_size: Option<String>,
}

/// Store profile edit (`PATCH stores/profile/`)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct StoreProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}
