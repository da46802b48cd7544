//! HTTP middleware

pub mod basic_auth;
pub mod cors;

pub use basic_auth::BasicAuth;
pub use cors::create_cors;
