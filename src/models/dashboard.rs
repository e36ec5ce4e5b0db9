//! Customer dashboard feeds and the nearby-store map

use rust_decimal::Decimal;
use serde::Deserialize;

/// Counters of `dashboard/stats/`; missing fields read as zero
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub active_rentals: u32,
    pub wishlist_items: u32,
    pub total_spent: Decimal,
    pub items_donated: u32,
}

/// Row of `rentals/current/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentRental {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub size: Option<String>,
    pub rental_period: Option<String>,
    pub return_date: Option<String>,
    /// `active`, `upcoming`, ...
    pub status: Option<String>,
}

/// Row of `activity/recent/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Activity {
    /// `payment`, `wishlist`, `rental`, ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub time: Option<String>,
}

/// Listing that is either a bare array or a paginated `results` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    List(Vec<T>),
    Page { results: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::List(items) => items,
            Listing::Page { results } => results,
        }
    }
}

/// Everything the customer dashboard shows. Feeds the backend does not
/// serve stay at their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub current_rentals: Vec<CurrentRental>,
    pub recent_activity: Vec<Activity>,
}

/// Store pin on the nearby-store map
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyStore {
    pub id: i64,
    pub store_name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub store_address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub store_logo_url: Option<String>,
    #[serde(default)]
    pub store_logo: Option<String>,
}

impl NearbyStore {
    /// Map position, when the store has saved one
    pub fn position(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn logo(&self) -> Option<&str> {
        self.store_logo_url.as_deref().or(self.store_logo.as_deref())
    }
}

/// Envelope of `stores/nearby/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyStoreList {
    #[serde(default)]
    pub data: Vec<NearbyStore>,
}
