//! Repository interfaces for persisted OTP records

pub mod otp;

pub use otp::{MockOtpStore, OtpStore};
