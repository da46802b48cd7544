//! One-time-code policy configuration

use serde::{Deserialize, Serialize};

/// Default lifetime of a pending code (10 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 600;

/// Default number of wrong guesses permitted before lockout
pub const DEFAULT_MAX_ATTEMPTS: i32 = 2;

/// Length of the generated code
pub const CODE_LENGTH: usize = 7;

/// Policy configuration for issuing and verifying one-time codes
///
/// The TTL and attempt limit are injected into the lifecycle service rather
/// than read from constants at the use sites, so tests can run with
/// compressed time windows.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a pending code stays verifiable after generation
    pub ttl_seconds: i64,

    /// Wrong guesses permitted before the record is locked out
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let ttl_seconds = std::env::var("OTP_TTL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_TTL_SECONDS.to_string())
            .parse()
            .unwrap_or(DEFAULT_TTL_SECONDS);
        let max_attempts = std::env::var("OTP_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        Self {
            ttl_seconds,
            max_attempts,
        }
    }

    /// Set the code lifetime in seconds
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    /// Set the wrong-guess limit
    pub fn with_max_attempts(mut self, attempts: i32) -> Self {
        self.max_attempts = attempts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_default() {
        let config = OtpConfig::default();
        assert_eq!(config.ttl_seconds, 600);
        assert_eq!(config.max_attempts, 2);
    }

    #[test]
    fn test_otp_config_builder() {
        let config = OtpConfig::default()
            .with_ttl_seconds(1)
            .with_max_attempts(5);
        assert_eq!(config.ttl_seconds, 1);
        assert_eq!(config.max_attempts, 5);
    }
}
