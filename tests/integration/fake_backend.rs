//! Minimal stand-in for the RentFit REST backend.
//!
//! Serves the routes the client uses from in-memory state, counts every hit
//! and records the `Authorization` header each route received.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

#[derive(Default)]
pub struct BackendState {
    pub rentals: Vec<Value>,
    pub donations: Vec<Value>,
    pub wishlist: Vec<i64>,
    pub unread: u32,
    pub notifications: Vec<Value>,
    pub clothing: Vec<Value>,
    pub messages: Vec<Value>,
    pub profile: Value,
    pub nearby: Vec<Value>,
    /// Answer every authenticated request with 401
    pub reject_token: bool,
    /// Answer every write (anything but GET and login) with 500
    pub fail_writes: bool,
    pub hits: HashMap<String, usize>,
    pub auth: HashMap<String, Option<String>>,
    /// JSON body of the last request to each route
    pub bodies: HashMap<String, Value>,
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeBackend {
    pub async fn start(state: BackendState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let router = Router::new().fallback(dispatch).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }

    /// Times `"METHOD /api/path/"` was requested
    pub fn hits(&self, route: &str) -> usize {
        self.state.lock().unwrap().hits.get(route).copied().unwrap_or(0)
    }

    /// Body of the last request to `route`
    pub fn body(&self, route: &str) -> Option<Value> {
        self.state.lock().unwrap().bodies.get(route).cloned()
    }

    /// `Authorization` header seen on the last request to `route`
    pub fn auth_header(&self, route: &str) -> Option<String> {
        self.state.lock().unwrap().auth.get(route).cloned().flatten()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

pub fn rental(id: i64, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "clothing": id * 10,
        "clothing_name": name,
        "customer": 7,
        "customer_email": "ana@example.com",
        "store": 3,
        "store_name": "Drape House",
        "rent_start_date": "2024-05-01",
        "rent_end_date": "2024-05-03",
        "total_price": "900.00",
        "status": status,
        "selected_size": "M"
    })
}

pub fn donation(id: i64, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "item_name": name,
        "category": "Jacket",
        "gender": "Unisex",
        "size": "L",
        "condition": "Good",
        "store_name": "Drape House",
        "donation_status": status
    })
}

pub fn notification(id: i64, message: &str, is_read: bool) -> Value {
    json!({
        "id": id,
        "message": message,
        "notification_type": "rental",
        "is_read": is_read,
        "created_at": "2024-05-01T10:00:00Z"
    })
}

pub fn clothing(id: i64, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "item_name": name,
        "size": "S,M,L",
        "rental_price": "450.00",
        "stock_quantity": 2,
        "clothing_status": status,
        "store": 3,
        "store_name": "Drape House"
    })
}

pub fn message(id: i64, sender: i64, text: &str) -> Value {
    json!({
        "id": id,
        "sender": sender,
        "text": text,
        "timestamp": "2024-05-01T10:00:00Z"
    })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
}

async fn dispatch(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let route = format!("{} {}", method, uri.path());
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let mut s = state.lock().unwrap();
    *s.hits.entry(route.clone()).or_default() += 1;
    s.auth.insert(route.clone(), authorization.clone());
    s.bodies.insert(route, body.clone());

    if s.reject_token && authorization.is_some() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Given token not valid for any token type"})),
        )
            .into_response();
    }

    let path = uri.path().trim_start_matches("/api/").trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').collect();

    if s.fail_writes && method != Method::GET && path != "accounts/login" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "Something went wrong."})),
        )
            .into_response();
    }

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["accounts", "login"]) => {
            let email = body["email"].as_str().unwrap_or_default().to_string();
            let role = if email.starts_with("store") { "Store" } else { "Customer" };
            Json(json!({
                "access_token": format!("access-{}", role.to_lowercase()),
                "refresh_token": "refresh",
                "user": {"id": 1, "email": email, "name": "Test", "role": role},
                "message": "Login successful"
            }))
            .into_response()
        }

        ("GET", ["rentals", "my" | "store"]) => Json(Value::Array(s.rentals.clone())).into_response(),

        ("PATCH", ["rentals", id, action]) => {
            let id: i64 = id.parse().unwrap_or_default();
            let (from, to) = match *action {
                "approve" => ("pending", "approved"),
                "reject" => ("pending", "rejected"),
                "mark-return" => ("rented", "returned_pending"),
                "confirm-return" => ("returned_pending", "returned_confirmed"),
                _ => return not_found(),
            };
            let Some(rental) = s.rentals.iter_mut().find(|r| r["id"] == id) else {
                return not_found();
            };
            if rental["status"] != from {
                return bad_request(&format!("Rental is not {}.", from.replace('_', " ")));
            }
            rental["status"] = json!(to);
            Json(json!({"message": format!("Rental {}", to)})).into_response()
        }

        ("GET", ["donations", "my" | "store"]) => {
            Json(Value::Array(s.donations.clone())).into_response()
        }

        ("PATCH", ["donations", "store", id, "status"]) => {
            let id: i64 = id.parse().unwrap_or_default();
            let Some(donation) = s.donations.iter_mut().find(|d| d["id"] == id) else {
                return not_found();
            };
            if donation["donation_status"] != "Pending" {
                return bad_request("Only pending donations can be reviewed.");
            }
            donation["donation_status"] = body["donation_status"].clone();
            Json(json!({"message": "Donation status updated"})).into_response()
        }
        ("PATCH", ["donations", id, "update"]) => {
            let id: i64 = id.parse().unwrap_or_default();
            let Some(donation) = s.donations.iter_mut().find(|d| d["id"] == id) else {
                return not_found();
            };
            if donation["donation_status"] != "Pending" {
                return bad_request("Cannot update donation. Status must be Pending.");
            }
            if let Some(changes) = body.as_object() {
                for (key, value) in changes {
                    donation[key.as_str()] = value.clone();
                }
            }
            Json(donation.clone()).into_response()
        }

        ("POST", ["payments", "initiate"]) => {
            if body["rental_id"].as_i64().is_none() {
                return bad_request("rental_id is required");
            }
            // Raw body so the field order on the wire is fixed
            let raw = r#"{"amount":"900","tax_amount":"0","total_amount":"900","transaction_uuid":"8f14e45f","product_code":"EPAYTEST","payment_url":"https://gateway.example/epay/main","success_url":"http://127.0.0.1:8000/api/payments/verify/","failure_url":"http://127.0.0.1:8000/api/payments/failure/","signed_field_names":"total_amount,transaction_uuid,product_code","signature":"c2lnbmVk"}"#;
            ([(header::CONTENT_TYPE, "application/json")], raw).into_response()
        }

        ("GET", ["accounts", "wishlist"]) => {
            let entries: Vec<Value> = s.wishlist.iter().map(|id| json!({"clothing_id": id})).collect();
            Json(Value::Array(entries)).into_response()
        }
        ("POST", ["accounts", "wishlist", "add"]) => {
            let Some(id) = body["clothing_id"].as_i64() else {
                return bad_request("clothing_id is required");
            };
            if id == 404 {
                return bad_request("Clothing not found");
            }
            if !s.wishlist.contains(&id) {
                s.wishlist.push(id);
            }
            (StatusCode::CREATED, Json(json!({"message": "Added to wishlist"}))).into_response()
        }
        ("DELETE", ["accounts", "wishlist", "remove-by-clothing", id]) => {
            let id: i64 = id.parse().unwrap_or_default();
            s.wishlist.retain(|c| *c != id);
            StatusCode::NO_CONTENT.into_response()
        }
        ("DELETE", ["accounts", "wishlist", "clear"]) => {
            s.wishlist.clear();
            StatusCode::NO_CONTENT.into_response()
        }

        ("GET", ["accounts", "clothing", "all"]) => Json(json!([])).into_response(),
        ("GET", ["accounts", "clothing", "my"]) => Json(Value::Array(s.clothing.clone())).into_response(),
        ("PATCH", ["accounts", "clothing", id, "status"]) => {
            let id: i64 = id.parse().unwrap_or_default();
            let Some(item) = s.clothing.iter_mut().find(|c| c["id"] == id) else {
                return not_found();
            };
            item["clothing_status"] = body["clothing_status"].clone();
            Json(item.clone()).into_response()
        }

        ("GET", ["accounts", "customers" | "stores", "profile"]) => Json(s.profile.clone()).into_response(),
        ("PATCH", ["accounts", "customers" | "stores", "profile"]) => {
            if let (Some(profile), Some(changes)) = (s.profile.as_object_mut(), body.as_object()) {
                for (key, value) in changes {
                    profile.insert(key.clone(), value.clone());
                }
            }
            Json(json!({"message": "Profile updated successfully"})).into_response()
        }
        ("GET", ["accounts", "stores", "nearby"]) => {
            Json(json!({"data": s.nearby.clone()})).into_response()
        }
        ("GET", ["accounts", "dashboard", "stats"]) => Json(json!({
            "active_rentals": 1,
            "wishlist_items": s.wishlist.len(),
            "total_spent": "900.00"
        }))
        .into_response(),
        ("GET", ["accounts", "rentals", "current"]) => Json(json!({"results": [
            {"id": 5, "name": "Party Gown", "size": "M", "status": "active"}
        ]}))
        .into_response(),

        ("GET", ["notifications"]) => Json(Value::Array(s.notifications.clone())).into_response(),
        ("GET", ["notifications", "unread-count"]) => {
            Json(json!({"unread_count": s.unread})).into_response()
        }
        ("PATCH", ["notifications", id, "read"]) => {
            let id: i64 = id.parse().unwrap_or_default();
            let Some(n) = s.notifications.iter_mut().find(|n| n["id"] == id) else {
                return not_found();
            };
            n["is_read"] = json!(true);
            Json(json!({"message": "Marked as read"})).into_response()
        }
        ("PATCH", ["notifications", "read-all"]) => {
            for n in s.notifications.iter_mut() {
                n["is_read"] = json!(true);
            }
            Json(json!({"message": "All marked as read"})).into_response()
        }

        ("GET", ["chat", _id]) => Json(Value::Array(s.messages.clone())).into_response(),
        ("POST", ["chat", _id, "send"]) => {
            let text = body["text"].as_str().unwrap_or_default().to_string();
            let id = s.messages.len() as i64 + 1;
            let sent = message(id, 1, &text);
            s.messages.push(sent.clone());
            (StatusCode::CREATED, Json(sent)).into_response()
        }

        _ => not_found(),
    }
}
