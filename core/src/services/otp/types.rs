//! Types for OTP service results

/// Result of a successful code request
#[derive(Debug, Clone)]
pub struct SentReceipt {
    /// The SMS message id from the provider
    pub message_id: String,
}
