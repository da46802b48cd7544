//! API configuration loaded from the environment

use pv_shared::config::ServerConfig;

/// Configuration for the API binary
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Basic-auth username required on every endpoint
    pub basic_auth_user: String,

    /// Basic-auth password required on every endpoint
    pub basic_auth_pass: String,

    /// Allowed CORS origin (`*` for any)
    pub allowed_origin: String,

    /// How often the background purge sweep runs, in seconds
    pub sweep_interval_seconds: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            basic_auth_user: std::env::var("BASIC_USER").unwrap_or_default(),
            basic_auth_pass: std::env::var("BASIC_PASS").unwrap_or_default(),
            allowed_origin: std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string()),
            sweep_interval_seconds: std::env::var("SWEEP_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
        }
    }
}
