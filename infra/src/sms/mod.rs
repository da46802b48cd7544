//! SMS Service Module
//!
//! This module provides SMS service implementations for delivering
//! confirmation codes. It includes the HTTP gateway client used in
//! production and a mock implementation for development.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Gateway Support**: Production SMS via a bearer-token JSON gateway
//! - **Mock Implementation**: Console output for development
//! - **Security**: Phone number masking in logs

pub mod adapter;
pub mod gateway;
pub mod mock_sms;
pub mod sms_service;

// Re-export commonly used types
pub use adapter::SmsSenderAdapter;
pub use gateway::{GatewayConfig, GatewaySmsService};
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;


use std::sync::Arc;

use crate::config::SmsConfig;

/// Create an SMS service based on configuration
///
/// Returns the appropriate SMS service implementation based on the
/// provider specified in the configuration, falling back to the mock
/// implementation when the gateway cannot be initialized.
pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        "gateway" => {
            let gateway_config = GatewayConfig {
                api_url: config.api_url.clone(),
                api_token: config.api_token.clone(),
                from_number: config.from_number.clone(),
                request_timeout_secs: 30,
            };

            match GatewaySmsService::new(gateway_config) {
                Ok(service) => Arc::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize gateway SMS service: {}", e);
                    tracing::warn!("Falling back to mock SMS service");
                    Arc::new(MockSmsService::new())
                }
            }
        }
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Arc::new(MockSmsService::new())
        }
    }
}
