//! Request and response payloads

pub mod otp;

pub use otp::{RequestCodeRequest, VerifyCodeRequest};
