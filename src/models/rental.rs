//! Rental model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::enums::RentalStatus;

/// Rental as returned by `rentals/my/` and `rentals/store/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: i64,
    pub clothing: i64,
    #[serde(default)]
    pub clothing_name: String,
    pub customer: i64,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub store: i64,
    #[serde(default)]
    pub store_name: String,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    /// Computed by the backend from the daily price and the inclusive day count
    pub total_price: Decimal,
    pub status: RentalStatus,
    #[serde(default)]
    pub selected_size: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Rental {
    /// Number of rented days, both ends inclusive
    pub fn duration_days(&self) -> i64 {
        (self.rent_end_date - self.rent_start_date).num_days() + 1
    }
}

/// Create rental request (`POST rentals/create/`)
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_rental_dates"))]
pub struct CreateRental {
    pub clothing: i64,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub selected_size: Option<String>,
}

fn validate_rental_dates(rental: &CreateRental) -> Result<(), ValidationError> {
    if rental.rent_end_date < rental.rent_start_date {
        let mut err = ValidationError::new("rent_end_date");
        err.message = Some("End date cannot be before start date.".into());
        return Err(err);
    }
    Ok(())
}

/// Body returned by the create endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRental {
    pub id: i64,
    pub clothing: i64,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
}
