//! Rental and donation lifecycles as seen from the client.
//!
//! The backend owns every state machine; this module only answers "which
//! actions can this viewer request for an entity in this status" and "which
//! endpoint does an action call". Pages render affordances from these tables
//! instead of inline status checks.

use reqwest::Method;
use serde_json::{json, Value};

use crate::models::{
    donation::DonationStatusUpdate,
    enums::{DonationStatus, RentalStatus, Role},
    Donation, Rental,
};

/// Which collection a list is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The signed-in customer's own entities (`my/`)
    Mine,
    /// Entities addressed to the signed-in store (`store/`)
    Store,
}

impl Scope {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Customer => Scope::Mine,
            Role::Store => Scope::Store,
        }
    }

    pub fn segment(&self) -> &'static str {
        match self {
            Scope::Mine => "my/",
            Scope::Store => "store/",
        }
    }
}

/// How local state follows a successful request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Apply locally first, revert on failure. Only for toggles without
    /// server-computed side effects.
    Optimistic,
    /// Leave local state alone and re-read the list once the server confirms.
    RefetchRequired,
}

/// HTTP call an action maps to, relative to its resource root
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// A user-facing action on a lifecycle entity
pub trait TransitionAction: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static {
    fn label(&self) -> &'static str;

    /// Endpoint the action calls; `None` for affordances that are not
    /// transitions (e.g. starting a payment).
    fn request(&self, id: i64) -> Option<TransitionRequest>;

    fn success_message(&self) -> &'static str;

    fn failure_message(&self) -> &'static str;

    fn policy(&self) -> UpdatePolicy {
        UpdatePolicy::RefetchRequired
    }
}

// ---------------------------------------------------------------------------
// Rentals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RentalAction {
    Approve,
    Reject,
    PayNow,
    MarkReturned,
    ConfirmReturn,
}

impl TransitionAction for RentalAction {
    fn label(&self) -> &'static str {
        match self {
            RentalAction::Approve => "Approve",
            RentalAction::Reject => "Reject",
            RentalAction::PayNow => "Pay Now",
            RentalAction::MarkReturned => "Return Item",
            RentalAction::ConfirmReturn => "Confirm Return",
        }
    }

    fn request(&self, id: i64) -> Option<TransitionRequest> {
        let action = match self {
            RentalAction::Approve => "approve",
            RentalAction::Reject => "reject",
            RentalAction::MarkReturned => "mark-return",
            RentalAction::ConfirmReturn => "confirm-return",
            RentalAction::PayNow => return None,
        };
        Some(TransitionRequest {
            method: Method::PATCH,
            path: format!("{}/{}/", id, action),
            body: None,
        })
    }

    fn success_message(&self) -> &'static str {
        match self {
            RentalAction::Approve => "Rental approved.",
            RentalAction::Reject => "Rental rejected.",
            RentalAction::PayNow => "Redirecting to payment.",
            RentalAction::MarkReturned => "Item marked as returned. Waiting for store confirmation.",
            RentalAction::ConfirmReturn => "Return confirmed.",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            RentalAction::Approve => "Failed to approve rental.",
            RentalAction::Reject => "Failed to reject rental.",
            RentalAction::PayNow => "Failed to initiate payment.",
            RentalAction::MarkReturned => "Failed to mark as returned.",
            RentalAction::ConfirmReturn => "Failed to confirm return.",
        }
    }
}

/// Actions a viewer is offered for a rental in `status`
pub fn rental_actions_for(status: RentalStatus, viewer: Role) -> Vec<RentalAction> {
    match (viewer, status) {
        (Role::Customer, RentalStatus::Approved) => vec![RentalAction::PayNow],
        (Role::Customer, RentalStatus::Rented) => vec![RentalAction::MarkReturned],
        (Role::Store, RentalStatus::Pending) => vec![RentalAction::Approve, RentalAction::Reject],
        (Role::Store, RentalStatus::ReturnedPending) => vec![RentalAction::ConfirmReturn],
        _ => Vec::new(),
    }
}

/// Passive hint shown where a customer has nothing to click
pub fn rental_status_hint(status: RentalStatus, viewer: Role) -> Option<&'static str> {
    match (viewer, status) {
        (Role::Customer, RentalStatus::Pending) => Some("Waiting for store approval"),
        (Role::Customer, RentalStatus::ReturnedPending) => Some("Waiting for return confirmation"),
        (_, RentalStatus::ReturnedConfirmed) => Some("Rental Completed"),
        (_, RentalStatus::Rejected) => Some("Request Rejected"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DonationAction {
    Approve,
    Reject,
    MarkCollected,
    Delete,
}

impl TransitionAction for DonationAction {
    fn label(&self) -> &'static str {
        match self {
            DonationAction::Approve => "Approve",
            DonationAction::Reject => "Reject",
            DonationAction::MarkCollected => "Mark as Collected",
            DonationAction::Delete => "Delete",
        }
    }

    fn request(&self, id: i64) -> Option<TransitionRequest> {
        let request = match self {
            DonationAction::Approve => TransitionRequest {
                method: Method::PATCH,
                path: format!("store/{}/status/", id),
                body: Some(json!(DonationStatusUpdate {
                    donation_status: DonationStatus::Approved,
                })),
            },
            DonationAction::Reject => TransitionRequest {
                method: Method::PATCH,
                path: format!("store/{}/status/", id),
                body: Some(json!(DonationStatusUpdate {
                    donation_status: DonationStatus::Rejected,
                })),
            },
            DonationAction::MarkCollected => TransitionRequest {
                method: Method::PATCH,
                path: format!("store/{}/collect/", id),
                body: None,
            },
            DonationAction::Delete => TransitionRequest {
                method: Method::DELETE,
                path: format!("{}/delete/", id),
                body: None,
            },
        };
        Some(request)
    }

    fn success_message(&self) -> &'static str {
        match self {
            DonationAction::Approve => "Donation approved successfully!",
            DonationAction::Reject => "Donation rejected.",
            DonationAction::MarkCollected => "Donation marked as collected!",
            DonationAction::Delete => "Donation deleted successfully.",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            DonationAction::Approve => "Failed to approve donation",
            DonationAction::Reject => "Failed to reject donation",
            DonationAction::MarkCollected => "Failed to mark as collected",
            DonationAction::Delete => "Failed to delete donation",
        }
    }
}

/// Actions a viewer is offered for a donation in `status`
pub fn donation_actions_for(status: DonationStatus, viewer: Role) -> Vec<DonationAction> {
    match (viewer, status) {
        (Role::Customer, DonationStatus::Pending) => vec![DonationAction::Delete],
        (Role::Store, DonationStatus::Pending) => {
            vec![DonationAction::Approve, DonationAction::Reject]
        }
        (Role::Store, DonationStatus::Approved) => vec![DonationAction::MarkCollected],
        _ => Vec::new(),
    }
}

/// Server-owned entity that carries a lifecycle status.
///
/// The client only reads the status; it is advanced by transition endpoints.
pub trait LifecycleEntity: Clone + Send + Sync + 'static {
    type Status: Copy + Eq + std::fmt::Debug + Send + Sync + 'static;
    type Action: TransitionAction;

    fn id(&self) -> i64;
    fn status(&self) -> Self::Status;
    fn item_name(&self) -> &str;
    fn store_name(&self) -> &str;

    /// Affordances `viewer` gets for this entity in its current status
    fn actions_for(&self, viewer: Role) -> Vec<Self::Action>;
}

impl LifecycleEntity for Rental {
    type Status = RentalStatus;
    type Action = RentalAction;

    fn id(&self) -> i64 {
        self.id
    }

    fn status(&self) -> RentalStatus {
        self.status
    }

    fn item_name(&self) -> &str {
        &self.clothing_name
    }

    fn store_name(&self) -> &str {
        &self.store_name
    }

    fn actions_for(&self, viewer: Role) -> Vec<RentalAction> {
        rental_actions_for(self.status, viewer)
    }
}

impl LifecycleEntity for Donation {
    type Status = DonationStatus;
    type Action = DonationAction;

    fn id(&self) -> i64 {
        self.id
    }

    fn status(&self) -> DonationStatus {
        self.donation_status
    }

    fn item_name(&self) -> &str {
        &self.item_name
    }

    fn store_name(&self) -> &str {
        &self.store_name
    }

    fn actions_for(&self, viewer: Role) -> Vec<DonationAction> {
        donation_actions_for(self.donation_status, viewer)
    }
}
