//! Database layer: connection pooling and the MySQL OTP store

pub mod connection;
pub mod otp_store;

pub use connection::DatabasePool;
pub use otp_store::MySqlOtpStore;
