//! One-time-code record entity for SMS porting confirmation.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolution state of a one-time-code record
///
/// Legal transitions:
/// - `absent -> Pending` via a request (full upsert)
/// - `Pending -> Pending` on a wrong guess while attempts remain
/// - `Pending -> Failed` when the guess limit is reached
/// - `Pending -> Success` on a correct guess
/// - `Pending -> absent` on expiry detection or send-failure rollback
/// - `Failed | Success -> Pending` only via a brand-new request; never an
///   in-place transition back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpStatus {
    /// Code issued, awaiting verification
    Pending,
    /// Verified successfully; terminal until overwritten
    Success,
    /// Attempts exhausted; terminal until overwritten
    Failed,
}

impl OtpStatus {
    /// Stored string form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpStatus::Pending => "pending",
            OtpStatus::Success => "success",
            OtpStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OtpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OtpStatus::Pending),
            "success" => Ok(OtpStatus::Success),
            "failed" => Ok(OtpStatus::Failed),
            other => Err(format!("unknown OTP status: {}", other)),
        }
    }
}

/// One-time-code record bound to a phone number
///
/// One record exists per number at any time; a new request fully replaces
/// the previous record. Expiry is always computed from `created_at` plus a
/// configured TTL, never stored as a deadline of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Phone number the code was sent to (primary identity)
    pub number: String,

    /// The current active 7-digit code
    pub code: String,

    /// Losing service provider named on the porting submission
    pub lsp: String,

    /// Order reference of the porting submission
    pub order_ref: String,

    /// Wrong guesses so far; meaningful only while pending
    pub failed_attempts: i32,

    /// Timestamp of the most recent code generation
    pub created_at: DateTime<Utc>,

    /// Resolution state
    pub status: OtpStatus,
}

impl OtpRecord {
    /// Creates a fresh pending record with a newly generated code
    ///
    /// # Arguments
    ///
    /// * `number` - The phone number being ported
    /// * `lsp` - Losing service provider identifier
    /// * `order_ref` - Porting order reference
    pub fn new_pending(
        number: impl Into<String>,
        lsp: impl Into<String>,
        order_ref: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            code: Self::generate_code(),
            lsp: lsp.into(),
            order_ref: order_ref.into(),
            failed_attempts: 0,
            created_at: Utc::now(),
            status: OtpStatus::Pending,
        }
    }

    /// Generates a 7-digit decimal code with no leading zero
    ///
    /// Uniformly sampled from `[1_000_000, 9_999_999]` using the OS CSPRNG.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        let code: u32 = rng.gen_range(1_000_000..=9_999_999);
        code.to_string()
    }

    /// Checks whether the record has outlived `ttl_seconds` as of `now`
    pub fn is_expired_at(&self, ttl_seconds: i64, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) > Duration::seconds(ttl_seconds)
    }

    /// Compares the supplied code against the stored one in constant time
    pub fn code_matches(&self, supplied: &str) -> bool {
        self.code.len() == supplied.len()
            && constant_time_eq(self.code.as_bytes(), supplied.as_bytes())
    }

    /// Remaining wrong guesses before lockout (0 if already at the limit)
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.failed_attempts).max(0)
    }
}
