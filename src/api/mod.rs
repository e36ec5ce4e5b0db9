//! Typed REST client for the RentFit backend

pub mod accounts;
pub mod chat;
pub mod clothing;
pub mod donations;
pub mod notifications;
pub mod payments;
pub mod rentals;
pub mod reviews;
pub mod wishlist;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header::AUTHORIZATION, Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{ClientError, ClientResult},
    lifecycle::{LifecycleEntity, Scope, TransitionAction},
    models::user::Ack,
    session::SessionStore,
};

/// Endpoints reachable without a bearer token
static PUBLIC_ENDPOINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|/)(login|register(/[a-z]+)?|verify-otp|clothing/all|clothing/\d+)/?$")
        .expect("public endpoint pattern is valid")
});

/// Whether `path` is on the allowlist that never carries the token
pub fn is_public_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    PUBLIC_ENDPOINT.is_match(path)
}

/// Shared HTTP client: base URL, bearer token attachment and error mapping
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> ClientResult<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| ClientError::BadRequest(format!("Invalid API base URL {}: {}", base, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = to_body(body)?;
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = to_body(body)?;
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let body = body.map(to_body).transpose()?;
        self.send(Method::PATCH, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::DELETE, path, None).await
    }

    /// Issue the call a lifecycle action maps to, under resource `root`
    pub async fn transition<A: TransitionAction>(
        &self,
        root: &str,
        id: i64,
        action: A,
    ) -> ClientResult<Ack> {
        let request = action.request(id).ok_or_else(|| {
            ClientError::BadRequest(format!("\"{}\" is not a status transition", action.label()))
        })?;
        let path = format!("{}{}", root, request.path);
        tracing::info!("Requesting {:?} on #{} ({} {})", action, id, request.method, path);
        let ack: Option<Ack> = self.send(request.method, &path, request.body).await?;
        Ok(ack.unwrap_or_default())
    }

    /// Send a request and decode the JSON response.
    ///
    /// An empty body decodes as JSON `null`, so `()` and `Option<T>` work for
    /// 204 responses.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<T> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::BadRequest(format!("Invalid path {}: {}", path, e)))?;

        let mut request = self.http.request(method.clone(), url);
        let token = if is_public_endpoint(path) {
            None
        } else {
            self.session.access_token()
        };
        let authenticated = token.is_some();
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!("{} {}", method, path);
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = ClientError::from_response(status, &text);
            if err.is_authentication() && authenticated {
                tracing::warn!("Token rejected on {} {}, clearing session", method, path);
                if let Err(e) = self.session.clear() {
                    tracing::warn!("Failed to clear session: {}", e);
                }
            } else {
                tracing::debug!("{} {} failed: {}", method, path, err);
            }
            return Err(err);
        }

        let raw = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(raw)
            .map_err(|e| ClientError::Decode(format!("{} {}: {}", method, path, e)))
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> ClientResult<Value> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Collection of lifecycle entities with named transition endpoints.
///
/// Implemented by the rentals and donations resources; the status view-model
/// is generic over it.
#[async_trait]
pub trait LifecycleEndpoint: Send + Sync + 'static {
    type Entity: LifecycleEntity;

    /// Plural noun used in user-facing notices ("rentals")
    fn resource_name(&self) -> &'static str;

    /// Full list for the actor in `scope`
    async fn list(&self, scope: Scope) -> ClientResult<Vec<Self::Entity>>;

    /// Request `action` on entity `id`
    async fn transition(
        &self,
        id: i64,
        action: <Self::Entity as LifecycleEntity>::Action,
    ) -> ClientResult<Ack>;
}
