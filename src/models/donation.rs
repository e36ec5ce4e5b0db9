//! Donation model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{Category, Condition, DonationStatus, Gender};

/// Donation as listed by `donations/my/` and `donations/store/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: i64,
    pub item_name: String,
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub size: String,
    pub condition: Option<Condition>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<String>,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub donation_status: DonationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create donation request (`POST donations/create/`)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateDonation {
    /// Receiving store
    pub store: i64,
    #[validate(length(min = 1, max = 255))]
    pub item_name: String,
    pub category: Category,
    pub gender: Gender,
    #[validate(length(min = 1, max = 255))]
    pub size: String,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Edit of a still-Pending donation (`PATCH donations/{id}/update/`)
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateDonation {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of the approve/reject call (`PATCH donations/store/{id}/status/`)
#[derive(Debug, Clone, Serialize)]
pub struct DonationStatusUpdate {
    pub donation_status: DonationStatus,
}

/// Store a customer can donate to
#[derive(Debug, Clone, Deserialize)]
pub struct DonationStore {
    pub id: i64,
    pub store_name: String,
    #[serde(default)]
    pub store_address: Option<String>,
}

/// Envelope returned by `donations/stores/`
#[derive(Debug, Clone, Deserialize)]
pub struct DonationStoreList {
    #[serde(default)]
    pub stores: Vec<DonationStore>,
}
