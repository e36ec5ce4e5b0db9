//! Review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create review request, one review per completed rental
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateReview {
    pub rental: i64,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1))]
    pub comment: String,
}

/// Partial update of an existing review
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateReview {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub comment: Option<String>,
}
