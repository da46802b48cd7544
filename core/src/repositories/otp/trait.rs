//! OTP store trait defining the interface for record persistence.
//!
//! One record exists per phone number; all mutation goes through the
//! operations below, never through read-then-blind-write outside them.
//! Implementations must make each operation atomic with respect to
//! concurrent calls for the same number (single-statement upserts and
//! conditional updates, not separate read/write round trips).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::{OtpRecord, OtpStatus};
use crate::errors::DomainError;

/// Repository trait for OTP record persistence operations
///
/// Per-number serialization is delegated to these primitives: the lifecycle
/// service never holds an in-process lock across calls.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Create or fully replace the record for `number`
    ///
    /// Resets `failed_attempts` to 0, `created_at` to `now`, and status to
    /// pending. Last writer wins; no partial state is ever observable.
    async fn upsert_pending(
        &self,
        number: &str,
        code: &str,
        lsp: &str,
        order_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Fetch the record for `number`, if any
    async fn find_by_number(&self, number: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Unconditionally overwrite the status of the record for `number`
    async fn set_status(&self, number: &str, status: OtpStatus) -> Result<(), DomainError>;

    /// Write the attempt counter and status in one atomic step
    async fn record_attempt(
        &self,
        number: &str,
        failed_attempts: i32,
        status: OtpStatus,
    ) -> Result<(), DomainError>;

    /// Delete the record only if it is still pending
    ///
    /// Returns `true` when a row was removed. A record that resolved between
    /// the caller's read and this call survives untouched.
    async fn delete_if_pending(&self, number: &str) -> Result<bool, DomainError>;

    /// Delete every pending record created before `cutoff`
    ///
    /// Success and failed rows survive regardless of age. Returns the number
    /// of rows removed.
    async fn purge_expired_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
