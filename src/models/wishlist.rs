//! Wishlist entry model

use serde::{Deserialize, Serialize};

use super::clothing::Clothing;

/// Entry of `wishlist/`; older backends return a bare `clothing_id`,
/// newer ones embed the clothing object.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub clothing: Option<Clothing>,
    #[serde(default)]
    pub clothing_id: Option<i64>,
}

impl WishlistEntry {
    pub fn clothing_id(&self) -> Option<i64> {
        self.clothing.as_ref().map(|c| c.id).or(self.clothing_id)
    }
}

/// Wishlist listing, either a bare array or a paginated `results` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WishlistPayload {
    List(Vec<WishlistEntry>),
    Page { results: Vec<WishlistEntry> },
}

impl WishlistPayload {
    pub fn into_entries(self) -> Vec<WishlistEntry> {
        match self {
            WishlistPayload::List(entries) => entries,
            WishlistPayload::Page { results } => results,
        }
    }
}

/// Add to wishlist request
#[derive(Debug, Clone, Serialize)]
pub struct AddToWishlist {
    pub clothing_id: i64,
}
