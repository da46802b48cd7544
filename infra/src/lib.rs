//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the PortVerify
//! application. It provides concrete implementations for the record store
//! and the outbound SMS channel that the core reaches only through traits.
//!
//! ## Architecture
//!
//! - **Database**: MySQL OTP store using SQLx single-statement primitives
//! - **SMS**: HTTP gateway client plus a mock implementation for development

// Re-export core error types for convenience
pub use pv_core::errors::*;

/// Database module - MySQL store implementation using SQLx
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services

    use serde::{Deserialize, Serialize};

    /// SMS service configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// SMS service provider ("gateway", "mock")
        pub provider: String,
        /// Gateway endpoint URL
        pub api_url: String,
        /// Bearer token for the gateway
        pub api_token: String,
        /// From phone number / sender identity
        pub from_number: String,
    }

    impl SmsConfig {
        /// Load SMS configuration from environment variables
        pub fn from_env() -> Self {
            Self {
                provider: std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
                api_url: std::env::var("SMS_API_URL").unwrap_or_default(),
                api_token: std::env::var("SMS_TOKEN").unwrap_or_default(),
                from_number: std::env::var("SMS_FROM").unwrap_or_default(),
            }
        }
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                api_url: String::new(),
                api_token: String::new(),
                from_number: String::new(),
            }
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
