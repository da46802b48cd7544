//! Domain layer: entities and the OTP state machine

pub mod entities;

pub use entities::otp_record::{OtpRecord, OtpStatus};
