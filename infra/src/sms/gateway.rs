//! HTTP gateway SMS service implementation
//!
//! Sends messages through a JSON SMS gateway authenticated with a bearer
//! token. Any non-success response is surfaced as a delivery failure with
//! the gateway's status and body, which the core turns into the rollback
//! path for the just-issued code.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use pv_shared::utils::phone::mask_phone_number;

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// Gateway SMS service configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gateway send endpoint
    pub api_url: String,
    /// Bearer token for the gateway
    pub api_token: String,
    /// From phone number / sender identity
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_url = std::env::var("SMS_API_URL")
            .map_err(|_| InfrastructureError::Config("SMS_API_URL not set".to_string()))?;
        let api_token = std::env::var("SMS_TOKEN")
            .map_err(|_| InfrastructureError::Config("SMS_TOKEN not set".to_string()))?;
        let from_number = std::env::var("SMS_FROM")
            .map_err(|_| InfrastructureError::Config("SMS_FROM not set".to_string()))?;

        Ok(Self {
            api_url,
            api_token,
            from_number,
            request_timeout_secs: std::env::var("SMS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// Wire format of the gateway send request
#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    text: &'a str,
}

/// Wire format of the gateway send response
#[derive(Deserialize, Default)]
struct SendResponse {
    #[serde(default)]
    message_id: Option<String>,
}

/// Gateway SMS service implementation
pub struct GatewaySmsService {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewaySmsService {
    /// Create a new gateway SMS service
    pub fn new(config: GatewayConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config(
                "SMS gateway URL is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(
            "Gateway SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let config = GatewayConfig::from_env()?;
        Self::new(config)
    }
}

#[async_trait]
impl SmsService for GatewaySmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        debug!(
            "Sending SMS to {} via gateway",
            mask_phone_number(phone_number)
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_token)
            .json(&SendRequest {
                from: &self.config.from_number,
                to: phone_number,
                text: message,
            })
            .send()
            .await
            .map_err(|e| {
                error!(
                    "SMS gateway request failed for {}: {}",
                    mask_phone_number(phone_number),
                    e
                );
                InfrastructureError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "SMS gateway rejected message for {} ({}): {}",
                mask_phone_number(phone_number),
                status.as_u16(),
                body
            );
            return Err(InfrastructureError::Sms(format!(
                "SMS send failed ({}): {}",
                status.as_u16(),
                body
            )));
        }

        // The gateway may or may not return a message id; fall back to a
        // locally generated one so callers always get an identifier.
        let message_id = response
            .json::<SendResponse>()
            .await
            .unwrap_or_default()
            .message_id
            .unwrap_or_else(|| format!("gw_{}", uuid::Uuid::new_v4()));

        info!(
            "SMS sent successfully to {} with id: {}",
            mask_phone_number(phone_number),
            message_id
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Gateway"
    }
}
