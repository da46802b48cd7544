//! Unit tests for the mock OTP store

use chrono::{Duration, Utc};

use crate::domain::entities::otp_record::{OtpRecord, OtpStatus};
use crate::repositories::otp::mock::MockOtpStore;
use crate::repositories::otp::OtpStore;

fn aged_record(number: &str, status: OtpStatus, age_seconds: i64) -> OtpRecord {
    let mut record = OtpRecord::new_pending(number, "A", "R1");
    record.status = status;
    record.created_at = Utc::now() - Duration::seconds(age_seconds);
    record
}

#[tokio::test]
async fn test_upsert_creates_fresh_pending_record() {
    let store = MockOtpStore::new();
    let now = Utc::now();

    store
        .upsert_pending("15551234567", "1234567", "A", "R1", now)
        .await
        .unwrap();

    let record = store.find_by_number("15551234567").await.unwrap().unwrap();
    assert_eq!(record.code, "1234567");
    assert_eq!(record.failed_attempts, 0);
    assert_eq!(record.created_at, now);
    assert_eq!(record.status, OtpStatus::Pending);
}

#[tokio::test]
async fn test_upsert_replaces_resolved_record() {
    let store = MockOtpStore::new();
    store
        .insert_raw(aged_record("15551234567", OtpStatus::Failed, 100))
        .await;

    let now = Utc::now();
    store
        .upsert_pending("15551234567", "7654321", "B", "R2", now)
        .await
        .unwrap();

    let record = store.find_by_number("15551234567").await.unwrap().unwrap();
    assert_eq!(record.status, OtpStatus::Pending);
    assert_eq!(record.failed_attempts, 0);
    assert_eq!(record.code, "7654321");
    assert_eq!(record.lsp, "B");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_find_missing_number() {
    let store = MockOtpStore::new();
    assert!(store.find_by_number("15551234567").await.unwrap().is_none());
}

#[tokio::test]
async fn test_record_attempt_updates_counter_and_status_together() {
    let store = MockOtpStore::new();
    store
        .insert_raw(aged_record("15551234567", OtpStatus::Pending, 0))
        .await;

    store
        .record_attempt("15551234567", 2, OtpStatus::Failed)
        .await
        .unwrap();

    let record = store.find_by_number("15551234567").await.unwrap().unwrap();
    assert_eq!(record.failed_attempts, 2);
    assert_eq!(record.status, OtpStatus::Failed);
}

#[tokio::test]
async fn test_delete_if_pending_removes_pending_row() {
    let store = MockOtpStore::new();
    store
        .insert_raw(aged_record("15551234567", OtpStatus::Pending, 0))
        .await;

    assert!(store.delete_if_pending("15551234567").await.unwrap());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete_if_pending_spares_resolved_rows() {
    let store = MockOtpStore::new();
    store
        .insert_raw(aged_record("15551234567", OtpStatus::Success, 0))
        .await;

    assert!(!store.delete_if_pending("15551234567").await.unwrap());
    assert_eq!(store.len().await, 1);

    // Absent rows are a no-op as well
    assert!(!store.delete_if_pending("15550000000").await.unwrap());
}

#[tokio::test]
async fn test_purge_deletes_only_expired_pending_rows() {
    let store = MockOtpStore::new();
    store
        .insert_raw(aged_record("15550000001", OtpStatus::Pending, 700))
        .await;
    store
        .insert_raw(aged_record("15550000002", OtpStatus::Pending, 10))
        .await;
    store
        .insert_raw(aged_record("15550000003", OtpStatus::Success, 700))
        .await;
    store
        .insert_raw(aged_record("15550000004", OtpStatus::Failed, 700))
        .await;

    let cutoff = Utc::now() - Duration::seconds(600);
    let purged = store.purge_expired_pending(cutoff).await.unwrap();

    assert_eq!(purged, 1);
    assert!(store.find_by_number("15550000001").await.unwrap().is_none());
    assert!(store.find_by_number("15550000002").await.unwrap().is_some());
    assert!(store.find_by_number("15550000003").await.unwrap().is_some());
    assert!(store.find_by_number("15550000004").await.unwrap().is_some());
}
