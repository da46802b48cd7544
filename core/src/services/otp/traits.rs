//! Traits for outbound SMS integration

use async_trait::async_trait;

/// Trait for the outbound SMS collaborator
///
/// The sender identity (from number) belongs to the implementation's own
/// configuration; the core only supplies destination and text. Any error is
/// treated as a delivery failure and triggers the request rollback path.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver a text message, returning the provider's message id
    async fn send_sms(&self, to: &str, text: &str) -> Result<String, String>;
}
