//! RentFit client
//!
//! Typed client for the RentFit clothing rental and donation marketplace:
//! REST endpoints, a process-wide session store, lifecycle dashboards,
//! polling feeds and the payment hand-off.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{ClientError, ClientResult};
pub use session::{Session, SessionStore};

/// Client state shared by every page
#[derive(Clone)]
pub struct RentfitClient {
    pub config: Arc<AppConfig>,
    pub session: SessionStore,
    pub services: Arc<services::Services>,
}

impl RentfitClient {
    /// Build the client; the session is restored from `session.file` when configured
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let session = match &config.session.file {
            Some(path) => SessionStore::load(path)?,
            None => SessionStore::new(),
        };
        Self::with_session(config, session)
    }

    pub fn with_session(config: AppConfig, session: SessionStore) -> ClientResult<Self> {
        let client = api::ApiClient::new(&config.api, session.clone())?;
        let services = services::Services::new(client, &config.polling);
        Ok(Self {
            config: Arc::new(config),
            session,
            services: Arc::new(services),
        })
    }
}
