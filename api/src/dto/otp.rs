use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /request`
///
/// The capitalized aliases accept payloads from older submission clients.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    /// Phone number being ported
    #[serde(alias = "Number")]
    #[validate(length(min = 1, max = 32))]
    pub number: String,

    /// Losing service provider identifier
    #[serde(alias = "LSP")]
    #[validate(length(min = 1, max = 255))]
    pub lsp: String,

    /// Porting order reference
    #[serde(alias = "OR")]
    #[validate(length(min = 1, max = 255))]
    pub order_ref: String,
}

/// Body of `POST /otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Phone number the code was sent to
    #[serde(alias = "Number")]
    #[validate(length(min = 1, max = 32))]
    pub number: String,

    /// The supplied 7-digit code
    #[serde(alias = "Code")]
    #[validate(length(min = 1, max = 16))]
    pub code: String,
}
