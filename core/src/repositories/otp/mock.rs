//! Mock implementation of OtpStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_record::{OtpRecord, OtpStatus};
use crate::errors::DomainError;

use super::trait_::OtpStore;

/// In-memory OTP store for testing
pub struct MockOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl MockOtpStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Seed a record directly, bypassing the trait operations
    pub async fn insert_raw(&self, record: OtpRecord) {
        self.records
            .write()
            .await
            .insert(record.number.clone(), record);
    }
}

impl Default for MockOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpStore for MockOtpStore {
    async fn upsert_pending(
        &self,
        number: &str,
        code: &str,
        lsp: &str,
        order_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(
            number.to_string(),
            OtpRecord {
                number: number.to_string(),
                code: code.to_string(),
                lsp: lsp.to_string(),
                order_ref: order_ref.to_string(),
                failed_attempts: 0,
                created_at: now,
                status: OtpStatus::Pending,
            },
        );
        Ok(())
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(number).cloned())
    }

    async fn set_status(&self, number: &str, status: OtpStatus) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(number) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "OtpRecord".to_string(),
            }),
        }
    }

    async fn record_attempt(
        &self,
        number: &str,
        failed_attempts: i32,
        status: OtpStatus,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(number) {
            Some(record) => {
                record.failed_attempts = failed_attempts;
                record.status = status;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "OtpRecord".to_string(),
            }),
        }
    }

    async fn delete_if_pending(&self, number: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get(number) {
            Some(record) if record.status == OtpStatus::Pending => {
                records.remove(number);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_expired_pending(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| {
            record.status != OtpStatus::Pending || record.created_at >= cutoff
        });
        Ok((before - records.len()) as u64)
    }
}
