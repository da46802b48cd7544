//! Business services

pub mod otp;

pub use otp::{OtpService, OtpSweeper, OtpSweeperConfig, SentReceipt, SmsSender};
