//! Client-side state built on top of the REST endpoints

pub mod auth;
pub mod chat;
pub mod clothing;
pub mod notifications;
pub mod payment;
pub mod poller;
pub mod view_model;
pub mod wishlist;

use std::sync::Arc;

use crate::{
    api::{
        accounts::AccountsApi, chat::ChatApi, clothing::ClothingApi, donations::DonationsApi,
        notifications::NotificationsApi, payments::PaymentsApi, rentals::RentalsApi,
        reviews::ReviewsApi, wishlist::WishlistApi, ApiClient,
    },
    config::PollingConfig,
    error::ClientResult,
    models::{enums::Role, Rental},
};

use self::{payment::PaymentHandoff, view_model::StatusViewModel};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub rentals: Arc<RentalsApi>,
    pub donations: Arc<DonationsApi>,
    pub clothing: ClothingApi,
    pub reviews: ReviewsApi,
    pub payments: PaymentsApi,
    pub wishlist: wishlist::Wishlist,
    pub notifications: notifications::NotificationCenter,
    pub chat: chat::ChatService,
}

impl Services {
    /// Create all services on top of one shared client
    pub fn new(client: ApiClient, polling: &PollingConfig) -> Self {
        let session = client.session().clone();
        Self {
            auth: auth::AuthService::new(AccountsApi::new(client.clone()), session),
            rentals: Arc::new(RentalsApi::new(client.clone())),
            donations: Arc::new(DonationsApi::new(client.clone())),
            clothing: ClothingApi::new(client.clone()),
            reviews: ReviewsApi::new(client.clone()),
            payments: PaymentsApi::new(client.clone()),
            wishlist: wishlist::Wishlist::new(WishlistApi::new(client.clone())),
            notifications: notifications::NotificationCenter::new(
                NotificationsApi::new(client.clone()),
                polling.notifications_period(),
            ),
            chat: chat::ChatService::new(ChatApi::new(client), polling.chat_period()),
        }
    }

    /// Rental dashboard for `viewer`
    pub fn rental_board(&self, viewer: Role) -> StatusViewModel<RentalsApi> {
        StatusViewModel::with_shared(Arc::clone(&self.rentals), viewer)
    }

    /// Donation dashboard for `viewer`
    pub fn donation_board(&self, viewer: Role) -> StatusViewModel<DonationsApi> {
        StatusViewModel::with_shared(Arc::clone(&self.donations), viewer)
    }

    pub fn inventory(&self) -> clothing::StoreInventory {
        clothing::StoreInventory::new(self.clothing.clone())
    }

    /// Payment hand-off for an approved rental
    pub fn pay(&self, rental: &Rental) -> ClientResult<PaymentHandoff> {
        PaymentHandoff::for_rental(self.payments.clone(), rental)
    }
}
