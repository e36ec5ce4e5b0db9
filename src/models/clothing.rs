//! Clothing listing model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::ClothingStatus;

/// Clothing listing owned by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clothing {
    pub id: i64,
    pub item_name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Comma separated list of sizes the store stocks
    #[serde(default)]
    pub size: String,
    pub rental_price: Decimal,
    #[serde(default)]
    pub security_deposit: Option<Decimal>,
    #[serde(default)]
    pub stock_quantity: i32,
    pub clothing_status: ClothingStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<String>,
    #[serde(default)]
    pub store: Option<i64>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Clothing {
    /// Sizes a renter can pick from
    pub fn sizes(&self) -> Vec<&str> {
        self.size
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes().iter().any(|s| s.eq_ignore_ascii_case(size))
    }
}

/// Create / update clothing request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ClothingForm {
    #[validate(length(min = 1, max = 255))]
    pub item_name: String,
    pub category: String,
    #[validate(length(min = 1))]
    pub size: String,
    pub rental_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_deposit: Option<Decimal>,
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of the availability toggle (`PATCH clothing/{id}/status/`)
#[derive(Debug, Clone, Serialize)]
pub struct ClothingStatusUpdate {
    pub clothing_status: ClothingStatus,
}
