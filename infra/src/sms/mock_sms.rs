//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS service for development and testing.
//! This implementation logs SMS messages instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use pv_shared::utils::phone::mask_phone_number;

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs SMS messages instead of delivering them
/// - Generates mock message IDs
/// - Tracks message count for testing
/// - Can simulate delivery failures
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock service that fails every send
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        if self.simulate_failure {
            warn!(
                "Mock SMS service simulating failure for phone: {}",
                mask_phone_number(phone_number)
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_phone_number(phone_number),
            message_id = %message_id,
            message_length = message.len(),
            message_number = count,
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
