//! Configuration management for the RentFit client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Root of the backend REST API, ending with `/api/`
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    pub notifications_secs: u64,
    pub chat_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// JSON file the session is persisted to between runs
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CredentialsConfig {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix RENTFIT_)
            .add_source(
                Environment::with_prefix("RENTFIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("api.base_url", ApiConfig::default().base_url)?
            .set_default("api.timeout_secs", ApiConfig::default().timeout_secs)?
            .set_default("logging.level", LoggingConfig::default().level)?
            .set_default("logging.format", LoggingConfig::default().format)?
            // Override backend URL from API_BASE_URL env var if present
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Configuration pointing at an explicit backend, used by tests and embedders
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            polling: PollingConfig::default(),
            session: SessionConfig::default(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PollingConfig {
    pub fn notifications_period(&self) -> Duration {
        Duration::from_secs(self.notifications_secs.max(1))
    }

    pub fn chat_period(&self) -> Duration {
        Duration::from_secs(self.chat_secs.max(1))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/".to_string(),
            timeout_secs: 15,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            notifications_secs: 15,
            chat_secs: 5,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { file: None }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}
