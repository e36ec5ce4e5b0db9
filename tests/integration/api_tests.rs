//! Client flows end to end against the fake backend

use std::time::Duration;

use tokio_test::{assert_err, assert_ok};

use serde_json::json;

use rentfit_client::{
    config::AppConfig,
    lifecycle::{DonationAction, RentalAction, Scope},
    models::{
        donation::UpdateDonation,
        enums::{ClothingStatus, Condition, DonationStatus, RentalStatus, Role},
        user::{CustomerProfileUpdate, StoreProfileUpdate},
        Rental,
    },
    services::{
        poller::Feed,
        view_model::{ListView, Notice},
    },
    ClientError, RentfitClient,
};

use crate::fake_backend::{
    clothing, donation, message, notification, rental, BackendState, FakeBackend,
};

fn client_for(backend: &FakeBackend) -> RentfitClient {
    let mut config = AppConfig::with_base_url(backend.base_url());
    config.api.timeout_secs = 2;
    config.polling.notifications_secs = 1;
    RentfitClient::new(config).unwrap()
}

async fn signed_in(backend: &FakeBackend, email: &str) -> RentfitClient {
    let client = client_for(backend);
    client.services.auth.login(email, "secret").await.unwrap();
    client
}

#[tokio::test]
async fn test_login_publishes_session() {
    let backend = FakeBackend::start(BackendState::default()).await;
    let client = client_for(&backend);
    let mut rx = client.session.subscribe();

    let session = client
        .services
        .auth
        .login("store@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(session.role(), Role::Store);
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().as_ref().map(|s| s.role()), Some(Role::Store));
    assert_eq!(backend.auth_header("POST /api/accounts/login/"), None);
}

#[tokio::test]
async fn test_store_approves_pending_rental() {
    let backend = FakeBackend::start(BackendState {
        rentals: vec![rental(1, "Silk Saree", "pending")],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "store@example.com").await;
    let board = client.services.rental_board(Role::Store);

    board.fetch(Scope::Store).await.unwrap();
    assert_eq!(board.actions(1), vec![RentalAction::Approve, RentalAction::Reject]);

    board.request_transition(1, RentalAction::Approve).await.unwrap();

    assert_eq!(backend.hits("PATCH /api/rentals/1/approve/"), 1);
    assert_eq!(backend.hits("GET /api/rentals/store/"), 2);
    assert_eq!(board.get(1).unwrap().status, RentalStatus::Approved);
    assert!(board.actions(1).is_empty());
    assert_eq!(board.notice(), Some(Notice::success("Rental approved.")));
}

#[tokio::test]
async fn test_rejected_transition_keeps_list() {
    let backend = FakeBackend::start(BackendState {
        rentals: vec![rental(2, "Wool Coat", "approved")],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let board = client.services.rental_board(Role::Customer);
    board.fetch(Scope::Mine).await.unwrap();

    let err = board
        .request_transition(2, RentalAction::MarkReturned)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(board.notice(), Some(Notice::error("Rental is not rented.")));
    assert_eq!(board.get(2).unwrap().status, RentalStatus::Approved);
    assert_eq!(backend.hits("GET /api/rentals/my/"), 1);
}

#[tokio::test]
async fn test_empty_donations_render_empty_state() {
    let backend = FakeBackend::start(BackendState::default()).await;
    let client = signed_in(&backend, "ana@example.com").await;
    let board = client.services.donation_board(Role::Customer);

    assert_eq!(board.refresh().await.unwrap(), 0);
    assert_eq!(board.view(), ListView::Empty);
    assert_eq!(board.notice(), None);
}

#[tokio::test]
async fn test_donation_board_lists_for_store() {
    let backend = FakeBackend::start(BackendState {
        donations: vec![donation(4, "Denim Jacket", "Pending")],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "store@example.com").await;
    let board = client.services.donation_board(Role::Store);

    board.refresh().await.unwrap();
    assert_eq!(backend.hits("GET /api/donations/store/"), 1);
    assert_eq!(board.actions(4).len(), 2);
}

#[tokio::test]
async fn test_payment_form_carries_every_field() {
    let backend = FakeBackend::start(BackendState::default()).await;
    let client = signed_in(&backend, "ana@example.com").await;
    let approved: Rental = serde_json::from_value(rental(5, "Party Gown", "approved")).unwrap();

    let form = client.services.pay(&approved).unwrap().begin().await.unwrap();

    assert_eq!(form.action, "https://gateway.example/epay/main");
    let names: Vec<_> = form.fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "amount",
            "tax_amount",
            "total_amount",
            "transaction_uuid",
            "product_code",
            "success_url",
            "failure_url",
            "signed_field_names",
            "signature"
        ]
    );
    assert!(form.render_html().contains("name=\"signature\" value=\"c2lnbmVk\""));
}

#[tokio::test]
async fn test_pending_rental_cannot_be_paid() {
    let backend = FakeBackend::start(BackendState::default()).await;
    let client = signed_in(&backend, "ana@example.com").await;
    let pending: Rental = serde_json::from_value(rental(6, "Kurta", "pending")).unwrap();

    assert!(matches!(client.services.pay(&pending), Err(ClientError::BadRequest(_))));
    assert_eq!(backend.hits("POST /api/payments/initiate/"), 0);
}

#[tokio::test]
async fn test_wishlist_toggle_round_trip() {
    let backend = FakeBackend::start(BackendState {
        wishlist: vec![5],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let wishlist = &client.services.wishlist;
    wishlist.load().await.unwrap();

    assert!(wishlist.toggle(9).await.unwrap());
    assert_eq!(wishlist.clothing_ids(), vec![5, 9]);
    assert!(!wishlist.toggle(9).await.unwrap());

    assert_eq!(wishlist.clothing_ids(), vec![5]);
    assert_eq!(backend.state.lock().unwrap().wishlist, vec![5]);
}

#[tokio::test]
async fn test_wishlist_add_reverts_on_failure() {
    let backend = FakeBackend::start(BackendState::default()).await;
    let client = signed_in(&backend, "ana@example.com").await;
    let wishlist = &client.services.wishlist;

    assert_err!(wishlist.add(404).await);
    assert!(!wishlist.contains(404));
}

#[tokio::test]
async fn test_rejected_token_clears_session() {
    let backend = FakeBackend::start(BackendState {
        rentals: vec![rental(1, "Silk Saree", "pending")],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    backend.state.lock().unwrap().reject_token = true;

    let board = client.services.rental_board(Role::Customer);
    let err = board.refresh().await.unwrap_err();

    assert!(err.is_authentication());
    assert!(!client.session.is_authenticated());
    assert_eq!(board.notice(), Some(Notice::error("Failed to load rentals.")));
}

#[tokio::test]
async fn test_bearer_only_on_private_endpoints() {
    let backend = FakeBackend::start(BackendState::default()).await;
    let client = signed_in(&backend, "ana@example.com").await;

    assert_ok!(client.services.clothing.catalog().await);
    assert_ok!(client.services.rental_board(Role::Customer).refresh().await);

    assert_eq!(backend.auth_header("GET /api/accounts/clothing/all/"), None);
    assert_eq!(
        backend.auth_header("GET /api/rentals/my/").as_deref(),
        Some("Bearer access-customer")
    );
}

#[tokio::test]
async fn test_unread_feed_polls_until_stopped() {
    let backend = FakeBackend::start(BackendState {
        unread: 3,
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;

    let (handle, feed) = client.services.notifications.watch_unread();
    let mut rx = feed.subscribe();
    tokio::time::timeout(Duration::from_secs(2), rx.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(feed.latest(), Some(3));

    handle.stop();
    let polled = backend.hits("GET /api/notifications/unread-count/");
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(backend.hits("GET /api/notifications/unread-count/"), polled);
}

#[tokio::test]
async fn test_store_approves_donation_and_refetches_once() {
    let backend = FakeBackend::start(BackendState {
        donations: vec![donation(4, "Denim Jacket", "Pending")],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "store@example.com").await;
    let board = client.services.donation_board(Role::Store);
    board.refresh().await.unwrap();

    board.request_transition(4, DonationAction::Approve).await.unwrap();

    assert_eq!(
        backend.body("PATCH /api/donations/store/4/status/"),
        Some(json!({"donation_status": "Approved"}))
    );
    assert_eq!(backend.hits("PATCH /api/donations/store/4/status/"), 1);
    assert_eq!(backend.hits("GET /api/donations/store/"), 2);
    assert_eq!(board.get(4).unwrap().donation_status, DonationStatus::Approved);
    assert_eq!(board.actions(4), vec![DonationAction::MarkCollected]);
    assert_eq!(board.notice(), Some(Notice::success("Donation approved successfully!")));
}

#[tokio::test]
async fn test_wishlist_remove_reverts_to_original_position() {
    let backend = FakeBackend::start(BackendState {
        wishlist: vec![3, 5, 9],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let wishlist = &client.services.wishlist;
    wishlist.load().await.unwrap();
    backend.state.lock().unwrap().fail_writes = true;

    assert_err!(wishlist.remove(5).await);

    assert_eq!(wishlist.clothing_ids(), vec![3, 5, 9]);
    assert_eq!(backend.hits("DELETE /api/accounts/wishlist/remove-by-clothing/5/"), 1);
}

#[tokio::test]
async fn test_wishlist_clear_reverts_on_failure() {
    let backend = FakeBackend::start(BackendState {
        wishlist: vec![3, 5, 9],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let wishlist = &client.services.wishlist;
    wishlist.load().await.unwrap();
    backend.state.lock().unwrap().fail_writes = true;

    assert_err!(wishlist.clear().await);
    assert_eq!(wishlist.clothing_ids(), vec![3, 5, 9]);

    backend.state.lock().unwrap().fail_writes = false;
    assert_ok!(wishlist.clear().await);
    assert!(wishlist.is_empty());
    assert!(backend.state.lock().unwrap().wishlist.is_empty());
}

#[tokio::test]
async fn test_mark_read_reverts_on_failure() {
    let backend = FakeBackend::start(BackendState {
        notifications: vec![
            notification(1, "Your rental was approved", false),
            notification(2, "Donation received", false),
            notification(3, "Welcome", true),
        ],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let center = &client.services.notifications;
    center.load().await.unwrap();
    assert_eq!(center.unread(), 2);
    backend.state.lock().unwrap().fail_writes = true;

    assert_err!(center.mark_read(1).await);
    assert_eq!(center.unread(), 2);
    assert!(!center.notifications()[0].is_read);

    assert_err!(center.mark_all_read().await);
    let read: Vec<bool> = center.notifications().iter().map(|n| n.is_read).collect();
    assert_eq!(read, vec![false, false, true]);

    backend.state.lock().unwrap().fail_writes = false;
    assert_ok!(center.mark_all_read().await);
    assert_eq!(center.unread(), 0);
}

#[tokio::test]
async fn test_availability_toggle_reverts_and_refuses_rented() {
    let backend = FakeBackend::start(BackendState {
        clothing: vec![
            clothing(1, "Silk Saree", "Available"),
            clothing(2, "Sherwani", "Rented"),
        ],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "store@example.com").await;
    let inventory = client.services.inventory();
    inventory.load().await.unwrap();

    let err = inventory.toggle_availability(2).await.unwrap_err();
    assert!(matches!(err, ClientError::BadRequest(_)));
    assert_eq!(backend.hits("PATCH /api/accounts/clothing/2/status/"), 0);

    backend.state.lock().unwrap().fail_writes = true;
    assert_err!(inventory.toggle_availability(1).await);
    assert_eq!(inventory.get(1).unwrap().clothing_status, ClothingStatus::Available);

    backend.state.lock().unwrap().fail_writes = false;
    assert_eq!(
        inventory.toggle_availability(1).await.unwrap(),
        ClothingStatus::Unavailable
    );
    assert_eq!(
        backend.state.lock().unwrap().clothing[0]["clothing_status"],
        "Unavailable"
    );
}

#[tokio::test]
async fn test_chat_send_rereads_thread_once() {
    let backend = FakeBackend::start(BackendState {
        messages: vec![message(1, 3, "Hello, how can we help?")],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let thread = client.services.chat.thread(8);

    let sent = thread.send("Is the gown available in M?").await.unwrap();

    assert_eq!(sent.text, "Is the gown available in M?");
    assert_eq!(backend.hits("POST /api/chat/8/send/"), 1);
    assert_eq!(backend.hits("GET /api/chat/8/"), 1);
    assert_eq!(thread.messages().len(), 2);
}

#[tokio::test]
async fn test_customer_profile_edit() {
    let backend = FakeBackend::start(BackendState {
        profile: json!({"full_name": "Ana", "city": "Kathmandu"}),
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let update = CustomerProfileUpdate {
        city: Some("Pokhara".to_string()),
        ..Default::default()
    };

    let profile = client.services.auth.update_customer_profile(&update).await.unwrap();

    assert_eq!(profile["city"], "Pokhara");
    assert_eq!(
        backend.body("PATCH /api/accounts/customers/profile/"),
        Some(json!({"city": "Pokhara"}))
    );

    let store_edit = client
        .services
        .auth
        .update_store_profile(&StoreProfileUpdate::default())
        .await;
    assert!(matches!(store_edit, Err(ClientError::BadRequest(_))));
    assert_eq!(backend.hits("PATCH /api/accounts/stores/profile/"), 0);
}

#[tokio::test]
async fn test_dashboard_tolerates_missing_feeds() {
    let backend = FakeBackend::start(BackendState {
        wishlist: vec![5, 9],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;

    let dashboard = client.services.auth.dashboard().await.unwrap();

    assert_eq!(dashboard.stats.active_rentals, 1);
    assert_eq!(dashboard.stats.wishlist_items, 2);
    assert_eq!(dashboard.current_rentals.len(), 1);
    assert_eq!(dashboard.current_rentals[0].name.as_deref(), Some("Party Gown"));
    assert!(dashboard.recent_activity.is_empty());
    assert_eq!(backend.hits("GET /api/accounts/activity/recent/"), 1);
}

#[tokio::test]
async fn test_nearby_stores_unwraps_envelope() {
    let backend = FakeBackend::start(BackendState {
        nearby: vec![json!({
            "id": 3,
            "store_name": "Drape House",
            "city": "Lalitpur",
            "latitude": 27.67,
            "longitude": 85.32
        })],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;

    let stores = client.services.auth.nearby_stores().await.unwrap();

    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].position(), Some((27.67, 85.32)));
}

#[tokio::test]
async fn test_pending_donation_can_be_edited() {
    let backend = FakeBackend::start(BackendState {
        donations: vec![
            donation(4, "Denim Jacket", "Pending"),
            donation(5, "Wool Scarf", "Approved"),
        ],
        ..Default::default()
    })
    .await;
    let client = signed_in(&backend, "ana@example.com").await;
    let changes = UpdateDonation {
        condition: Some(Condition::LikeNew),
        ..Default::default()
    };

    let updated = client.services.donations.update(4, &changes).await.unwrap();
    assert_eq!(updated.condition, Some(Condition::LikeNew));
    assert_eq!(
        backend.body("PATCH /api/donations/4/update/"),
        Some(json!({"condition": "Like New"}))
    );

    let err = client.services.donations.update(5, &changes).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(err.user_message("Failed"), "Cannot update donation. Status must be Pending.");
}
