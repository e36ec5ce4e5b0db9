//! Shared domain enums (mirroring the backend's choice fields)

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RentalStatus
// ---------------------------------------------------------------------------

/// Rental lifecycle status, advanced by the backend only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Pending,
    Approved,
    Rejected,
    Rented,
    ReturnedPending,
    ReturnedConfirmed,
    #[serde(other)]
    Unknown,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Approved => "approved",
            RentalStatus::Rejected => "rejected",
            RentalStatus::Rented => "rented",
            RentalStatus::ReturnedPending => "returned_pending",
            RentalStatus::ReturnedConfirmed => "returned_confirmed",
            RentalStatus::Unknown => "unknown",
        }
    }

    /// No further transition can be requested from these states
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RentalStatus::Rejected | RentalStatus::ReturnedConfirmed
        )
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RentalStatus::Pending => "Pending",
            RentalStatus::Approved => "Approved",
            RentalStatus::Rejected => "Rejected",
            RentalStatus::Rented => "Rented",
            RentalStatus::ReturnedPending => "Returned Pending",
            RentalStatus::ReturnedConfirmed => "Returned Confirmed",
            RentalStatus::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for RentalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RentalStatus::Pending),
            "approved" => Ok(RentalStatus::Approved),
            "rejected" => Ok(RentalStatus::Rejected),
            "rented" => Ok(RentalStatus::Rented),
            "returned_pending" => Ok(RentalStatus::ReturnedPending),
            "returned_confirmed" => Ok(RentalStatus::ReturnedConfirmed),
            _ => Err(format!("Invalid rental status: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// DonationStatus
// ---------------------------------------------------------------------------

/// Donation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DonationStatus {
    Pending,
    Approved,
    Rejected,
    Collected,
    #[serde(other)]
    Unknown,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "Pending",
            DonationStatus::Approved => "Approved",
            DonationStatus::Rejected => "Rejected",
            DonationStatus::Collected => "Collected",
            DonationStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DonationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DonationStatus::Pending),
            "approved" => Ok(DonationStatus::Approved),
            "rejected" => Ok(DonationStatus::Rejected),
            "collected" => Ok(DonationStatus::Collected),
            _ => Err(format!("Invalid donation status: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// ClothingStatus
// ---------------------------------------------------------------------------

/// Availability of a clothing listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClothingStatus {
    Available,
    Rented,
    Unavailable,
    #[serde(other)]
    Unknown,
}

impl ClothingStatus {
    /// Status a store toggle moves the listing to
    pub fn toggled(&self) -> ClothingStatus {
        match self {
            ClothingStatus::Available => ClothingStatus::Unavailable,
            _ => ClothingStatus::Available,
        }
    }

    pub fn is_rentable(&self) -> bool {
        matches!(self, ClothingStatus::Available)
    }
}

impl std::fmt::Display for ClothingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ClothingStatus::Available => "Available",
            ClothingStatus::Rented => "Rented",
            ClothingStatus::Unavailable => "Unavailable",
            ClothingStatus::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Account role, gates which dashboard and API scope a session uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Store,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Store => "Store",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "store" => Ok(Role::Store),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Donation item metadata
// ---------------------------------------------------------------------------

/// Donated garment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Shirt,
    Pants,
    Dress,
    Jacket,
    Skirt,
    Shoes,
    Accessories,
    Other,
    #[serde(other)]
    Unknown,
}

/// Donated garment condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    Good,
    Used,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unisex,
    Other,
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Rental,
    Donation,
    System,
    Chat,
    #[serde(other)]
    Unknown,
}

impl Default for NotificationType {
    fn default() -> Self {
        NotificationType::System
    }
}
