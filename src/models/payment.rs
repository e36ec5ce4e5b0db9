//! Payment initiation types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Initiate payment request (`POST payments/initiate/`)
#[derive(Debug, Clone, Serialize)]
pub struct InitiatePayment {
    pub rental_id: i64,
}

/// Raw initiation response: `payment_url` plus the gateway's hidden fields,
/// in the order the backend sent them.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct PaymentInitiation(pub IndexMap<String, Value>);
