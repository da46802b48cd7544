//! OTP lifecycle service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;

use pv_shared::config::OtpConfig;
use pv_shared::utils::phone::mask_phone_number;

use crate::domain::entities::otp_record::{OtpRecord, OtpStatus};
use crate::errors::{DomainResult, OtpError, ValidationError};
use crate::repositories::otp::OtpStore;

use super::traits::SmsSender;
use super::types::SentReceipt;

/// Lifecycle service for one-time porting-confirmation codes
///
/// Stateless itself; all shared state lives in the store, and per-number
/// ordering is delegated to the store's atomic primitives.
pub struct OtpService<S: SmsSender, R: OtpStore> {
    /// SMS sender for code delivery
    sms_sender: Arc<S>,
    /// Persisted record store
    store: Arc<R>,
    /// TTL and attempt-limit policy
    config: OtpConfig,
}

impl<S: SmsSender, R: OtpStore> OtpService<S, R> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `sms_sender` - Outbound SMS implementation
    /// * `store` - Record store implementation
    /// * `config` - TTL and attempt-limit policy
    pub fn new(sms_sender: Arc<S>, store: Arc<R>, config: OtpConfig) -> Self {
        Self {
            sms_sender,
            store,
            config,
        }
    }

    /// The policy this service was built with
    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Issue a fresh code for a porting submission and deliver it via SMS
    ///
    /// Any prior record for the number is fully replaced, wiping earlier
    /// attempts and status. If delivery fails, the just-created pending
    /// record is rolled back so the store does not accumulate codes that
    /// were never delivered.
    ///
    /// # Arguments
    ///
    /// * `number` - The phone number being ported
    /// * `lsp` - Losing service provider identifier
    /// * `order_ref` - Porting order reference
    ///
    /// # Returns
    ///
    /// * `Ok(SentReceipt)` - Code stored and SMS accepted by the provider
    /// * `Err(DomainError)` - Validation, store, or delivery failure
    pub async fn request_code(
        &self,
        number: &str,
        lsp: &str,
        order_ref: &str,
    ) -> DomainResult<SentReceipt> {
        let number = required_field("number", number)?;
        let lsp = required_field("lsp", lsp)?;
        let order_ref = required_field("order_ref", order_ref)?;

        let record = OtpRecord::new_pending(number, lsp, order_ref);

        tracing::info!(
            number = %mask_phone_number(number),
            event = "otp_generated",
            "Generated new confirmation code for porting submission"
        );

        self.store
            .upsert_pending(number, &record.code, lsp, order_ref, record.created_at)
            .await?;

        let text = confirmation_sms_text(&record.code);
        match self.sms_sender.send_sms(number, &text).await {
            Ok(message_id) => {
                tracing::info!(
                    number = %mask_phone_number(number),
                    message_id = %message_id,
                    event = "otp_sent",
                    "Confirmation code delivered"
                );
                Ok(SentReceipt { message_id })
            }
            Err(detail) => {
                // Roll back the fresh record so a later verify cannot be
                // fooled into thinking a code was delivered. Conditional on
                // still-pending: a record that resolved in the meantime
                // survives.
                if let Err(e) = self.store.delete_if_pending(number).await {
                    tracing::warn!(
                        number = %mask_phone_number(number),
                        error = %e,
                        "Failed to roll back undelivered code"
                    );
                }
                tracing::error!(
                    number = %mask_phone_number(number),
                    event = "otp_delivery_failed",
                    detail = %detail,
                    "SMS delivery failed; pending record rolled back"
                );
                Err(OtpError::DeliveryFailed { detail }.into())
            }
        }
    }

    /// Verify a supplied code against the active record for a number
    ///
    /// Outcomes, first match wins: no record, already verified, locked out,
    /// expired (record deleted as a side effect), lockout-by-prior-attempts,
    /// correct code, wrong code (counter incremented, possibly locking out).
    ///
    /// # Arguments
    ///
    /// * `number` - The phone number the code was sent to
    /// * `code` - The supplied code
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Code matched; record is now `success`
    /// * `Err(DomainError)` - One of the `OtpError` outcomes, a validation
    ///   error, or a store failure
    pub async fn verify_code(&self, number: &str, code: &str) -> DomainResult<()> {
        let number = required_field("number", number)?;
        let code = required_field("code", code)?;

        let record = match self.store.find_by_number(number).await? {
            Some(record) => record,
            None => return Err(OtpError::CodeNotFound.into()),
        };

        // Resolved records never re-enter verification
        match record.status {
            OtpStatus::Success => return Err(OtpError::AlreadyVerified.into()),
            OtpStatus::Failed => return Err(OtpError::AttemptsExhausted.into()),
            OtpStatus::Pending => {}
        }

        if record.is_expired_at(self.config.ttl_seconds, Utc::now()) {
            // Deletion is a side effect of detection, not a precondition of
            // the expired outcome: report Gone even if the delete loses a
            // race or the store hiccups.
            if let Err(e) = self.store.delete_if_pending(number).await {
                tracing::warn!(
                    number = %mask_phone_number(number),
                    error = %e,
                    "Failed to delete expired pending code"
                );
            }
            tracing::info!(
                number = %mask_phone_number(number),
                event = "otp_expired",
                "Expired pending code detected during verification"
            );
            return Err(OtpError::CodeExpired.into());
        }

        if record.failed_attempts >= self.config.max_attempts {
            self.store.set_status(number, OtpStatus::Failed).await?;
            return Err(OtpError::AttemptsExhausted.into());
        }

        if record.code_matches(code) {
            self.store.set_status(number, OtpStatus::Success).await?;
            tracing::info!(
                number = %mask_phone_number(number),
                event = "otp_verified",
                "Porting submission confirmed"
            );
            return Ok(());
        }

        let new_attempts = record.failed_attempts + 1;
        if new_attempts >= self.config.max_attempts {
            self.store
                .record_attempt(number, new_attempts, OtpStatus::Failed)
                .await?;
            tracing::warn!(
                number = %mask_phone_number(number),
                event = "otp_locked_out",
                "Wrong code; attempt limit reached"
            );
            Err(OtpError::AttemptsExhausted.into())
        } else {
            self.store
                .record_attempt(number, new_attempts, OtpStatus::Pending)
                .await?;
            let attempts_left = (self.config.max_attempts - new_attempts) as u32;
            tracing::warn!(
                number = %mask_phone_number(number),
                event = "otp_wrong_code",
                attempts_left,
                "Wrong code; attempts remain"
            );
            Err(OtpError::IncorrectCode { attempts_left }.into())
        }
    }

    /// Delete every pending record older than the configured TTL
    ///
    /// Idempotent; terminal records survive regardless of age.
    pub async fn purge_expired_pending(&self) -> DomainResult<u64> {
        let cutoff = Utc::now() - Duration::seconds(self.config.ttl_seconds);
        let purged = self.store.purge_expired_pending(cutoff).await?;
        if purged > 0 {
            tracing::info!(purged, "Purged expired pending codes");
        }
        Ok(purged)
    }
}

/// Trim an input and reject it when empty
fn required_field<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(trimmed)
}

/// Message body delivered with each confirmation code
fn confirmation_sms_text(code: &str) -> String {
    format!(
        "Hi,\n\nThank you for your porting submission.\n\nYour unique code: {}\n",
        code
    )
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_required_field_trims() {
        assert_eq!(required_field("number", "  15551234567 ").unwrap(), "15551234567");
    }

    #[test]
    fn test_required_field_rejects_blank() {
        let err = required_field("lsp", "   ").unwrap_err();
        assert!(err.to_string().contains("lsp"));
    }

    #[test]
    fn test_confirmation_sms_text_contains_code() {
        let text = confirmation_sms_text("1234567");
        assert!(text.contains("Your unique code: 1234567"));
        assert!(text.contains("porting submission"));
    }
}
