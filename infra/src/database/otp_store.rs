//! MySQL OTP record store
//!
//! Implements the core `OtpStore` trait over a single `otps` table keyed by
//! phone number. Every mutation is a single SQL statement, so per-number
//! atomicity comes from the database rather than in-process locking: the
//! upsert is last-writer-wins, the conditional delete only touches rows
//! still pending, and the attempt update writes counter and status together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};

use pv_core::domain::entities::otp_record::{OtpRecord, OtpStatus};
use pv_core::errors::DomainError;
use pv_core::repositories::otp::OtpStore;
use pv_shared::utils::phone::mask_phone_number;

/// MySQL-backed OTP record store
pub struct MySqlOtpStore {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlOtpStore {
    /// Create a new OTP store over an existing pool
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        let status: String = row
            .try_get("status")
            .map_err(|e| Self::internal("Failed to read status column", e))?;
        let status: OtpStatus = status
            .parse()
            .map_err(|e| Self::internal("Corrupt status column", e))?;

        Ok(OtpRecord {
            number: row
                .try_get("number")
                .map_err(|e| Self::internal("Failed to read number column", e))?,
            code: row
                .try_get("code")
                .map_err(|e| Self::internal("Failed to read code column", e))?,
            lsp: row
                .try_get("lsp")
                .map_err(|e| Self::internal("Failed to read lsp column", e))?,
            order_ref: row
                .try_get("order_ref")
                .map_err(|e| Self::internal("Failed to read order_ref column", e))?,
            failed_attempts: row
                .try_get("failed_attempts")
                .map_err(|e| Self::internal("Failed to read failed_attempts column", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| Self::internal("Failed to read created_at column", e))?,
            status,
        })
    }
}

#[async_trait]
impl OtpStore for MySqlOtpStore {
    async fn upsert_pending(
        &self,
        number: &str,
        code: &str,
        lsp: &str,
        order_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO otps (number, code, lsp, order_ref, failed_attempts, created_at, status)
            VALUES (?, ?, ?, ?, 0, ?, 'pending')
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                lsp = VALUES(lsp),
                order_ref = VALUES(order_ref),
                failed_attempts = 0,
                created_at = VALUES(created_at),
                status = 'pending'
        "#;

        sqlx::query(query)
            .bind(number)
            .bind(code)
            .bind(lsp)
            .bind(order_ref)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    number = %mask_phone_number(number),
                    error = %e,
                    "Failed to upsert pending OTP record"
                );
                Self::internal("Failed to upsert OTP record", e)
            })?;

        debug!(
            number = %mask_phone_number(number),
            "Upserted fresh pending OTP record"
        );

        Ok(())
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<OtpRecord>, DomainError> {
        let query = r#"
            SELECT number, code, lsp, order_ref, failed_attempts, created_at, status
            FROM otps
            WHERE number = ?
        "#;

        let row = sqlx::query(query)
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    number = %mask_phone_number(number),
                    error = %e,
                    "Failed to fetch OTP record"
                );
                Self::internal("Failed to fetch OTP record", e)
            })?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn set_status(&self, number: &str, status: OtpStatus) -> Result<(), DomainError> {
        sqlx::query("UPDATE otps SET status = ? WHERE number = ?")
            .bind(status.as_str())
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    number = %mask_phone_number(number),
                    error = %e,
                    "Failed to update OTP status"
                );
                Self::internal("Failed to update OTP status", e)
            })?;

        Ok(())
    }

    async fn record_attempt(
        &self,
        number: &str,
        failed_attempts: i32,
        status: OtpStatus,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE otps SET failed_attempts = ?, status = ? WHERE number = ?")
            .bind(failed_attempts)
            .bind(status.as_str())
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    number = %mask_phone_number(number),
                    error = %e,
                    "Failed to record OTP attempt"
                );
                Self::internal("Failed to record OTP attempt", e)
            })?;

        Ok(())
    }

    async fn delete_if_pending(&self, number: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otps WHERE number = ? AND status = 'pending'")
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    number = %mask_phone_number(number),
                    error = %e,
                    "Failed to delete pending OTP record"
                );
                Self::internal("Failed to delete pending OTP record", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otps WHERE status = 'pending' AND created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to purge expired pending OTP records");
                Self::internal("Failed to purge expired OTP records", e)
            })?;

        Ok(result.rows_affected())
    }
}
