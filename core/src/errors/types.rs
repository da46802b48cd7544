//! Domain-specific error types for the OTP confirmation flow
//!
//! This module provides error type definitions for code issuance and
//! verification. HTTP status mapping lives in the presentation layer.

use thiserror::Error;

/// Verification-flow errors
///
/// Each variant corresponds to one terminal outcome of a request or verify
/// operation. The presentation layer maps these onto HTTP statuses.
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("OTP not found or expired")]
    CodeNotFound,

    #[error("OTP already verified")]
    AlreadyVerified,

    #[error("Attempts exhausted; request a new code.")]
    AttemptsExhausted,

    #[error("OTP expired")]
    CodeExpired,

    #[error("Incorrect code. Try again.")]
    IncorrectCode { attempts_left: u32 },

    #[error("Failed to send SMS: {detail}")]
    DeliveryFailed { detail: String },
}

/// Input validation errors
///
/// These are the caller's fault and never change stored state.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    RequiredField { field: String },
}
