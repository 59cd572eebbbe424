//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

fn default_rate_limit_max_requests() -> u32 {
    10
}

fn default_rate_limit_window_secs() -> u64 {
    3600
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Shared secret used to verify access tokens issued by the auth service.
    pub jwt_secret: String,
    /// Base URL of the transactional email API.
    pub email_api_url: String,
    pub email_api_key: String,
    pub email_from: String,
    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,
}

impl ServerConfig {
    /// Reads `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
    /// profile (defaults to `local`) and `APP_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    /// Whether outbound email has credentials to work with.
    pub fn email_configured(&self) -> bool {
        !self.email_api_key.trim().is_empty() && !self.email_api_url.trim().is_empty()
    }
}
