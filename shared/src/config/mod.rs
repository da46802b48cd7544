//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `otp` - One-time-code policy (TTL, attempt limit, code length)
//! - `server` - HTTP server configuration

pub mod database;
pub mod otp;
pub mod server;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use otp::OtpConfig;
pub use server::ServerConfig;
