//! Domain-error to HTTP response mapping
//!
//! Every failing endpoint returns the shared `ErrorBody` envelope; the
//! status code distinguishes the outcome kind so clients can react without
//! parsing messages.

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse};

use pv_core::errors::{DomainError, OtpError, ValidationError};
use pv_shared::types::response::ErrorBody;

/// Map a domain error onto an HTTP response
pub fn error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::ValidationErr(ValidationError::RequiredField { field }) => {
            HttpResponse::BadRequest()
                .json(ErrorBody::new(format!("Missing required field: {}", field)))
        }
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorBody::new(message.clone()))
        }
        DomainError::Otp(otp_error) => otp_error_response(otp_error),
        DomainError::NotFound { resource } => {
            HttpResponse::NotFound().json(ErrorBody::new(format!("{} not found", resource)))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error while handling request: {}", message);
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal error"))
        }
    }
}

fn otp_error_response(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::CodeNotFound => HttpResponse::NotFound().json(ErrorBody::new(error.to_string())),
        OtpError::AlreadyVerified => {
            HttpResponse::Conflict().json(ErrorBody::new(error.to_string()))
        }
        OtpError::AttemptsExhausted => {
            HttpResponse::Forbidden().json(ErrorBody::new(error.to_string()))
        }
        OtpError::CodeExpired => HttpResponse::Gone().json(ErrorBody::new(error.to_string())),
        OtpError::IncorrectCode { attempts_left } => HttpResponse::Unauthorized()
            .json(ErrorBody::new("Incorrect code. Try again.").with_attempts_left(*attempts_left)),
        OtpError::DeliveryFailed { detail } => HttpResponse::BadGateway()
            .json(ErrorBody::new("Failed to send SMS").with_detail(detail.clone())),
    }
}

/// JSON deserialization failures become a uniform 400 body
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let detail = err.to_string();
    let response =
        HttpResponse::BadRequest().json(ErrorBody::new("Invalid JSON body").with_detail(detail));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (
                ValidationError::RequiredField {
                    field: "number".to_string(),
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (OtpError::CodeNotFound.into(), StatusCode::NOT_FOUND),
            (OtpError::AlreadyVerified.into(), StatusCode::CONFLICT),
            (OtpError::AttemptsExhausted.into(), StatusCode::FORBIDDEN),
            (OtpError::CodeExpired.into(), StatusCode::GONE),
            (
                OtpError::IncorrectCode { attempts_left: 1 }.into(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                OtpError::DeliveryFailed {
                    detail: "boom".to_string(),
                }
                .into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                DomainError::Internal {
                    message: "db down".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error_response(&error).status(), expected, "{:?}", error);
        }
    }
}
