//! SMS service trait adapter
//!
//! Bridges the infrastructure `SmsService` implementations to the core
//! `SmsSender` trait, so the lifecycle service never depends on
//! infrastructure error types.

use async_trait::async_trait;
use std::sync::Arc;

use pv_core::services::otp::SmsSender;

use crate::sms::sms_service::SmsService;

/// Adapter that implements the core SmsSender trait for any SmsService
pub struct SmsSenderAdapter {
    inner: Arc<dyn SmsService>,
}

impl SmsSenderAdapter {
    /// Wrap an infrastructure SMS service
    pub fn new(inner: Arc<dyn SmsService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SmsSender for SmsSenderAdapter {
    async fn send_sms(&self, to: &str, text: &str) -> Result<String, String> {
        self.inner
            .send_sms(to, text)
            .await
            .map_err(|e| e.to_string())
    }
}
