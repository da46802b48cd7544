//! Shared utilities and common types for the PortVerify server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response structures
//! - Utility functions (phone masking, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, OtpConfig, ServerConfig};
pub use types::response::{ErrorBody, StatusBody};
pub use utils::phone;
