use actix_web::{web, HttpResponse};
use validator::Validate;

use pv_core::repositories::otp::OtpStore;
use pv_core::services::otp::SmsSender;
use pv_shared::types::response::{ErrorBody, StatusBody};
use pv_shared::utils::phone::mask_phone_number;

use crate::dto::otp::VerifyCodeRequest;
use crate::handlers::error::error_response;

use super::request_code::AppState;

/// Handler for `POST /otp`
///
/// Verifies a supplied code against the active record for a number.
///
/// # Request Body
///
/// ```json
/// {
///     "number": "15551234567",
///     "code": "4827351"
/// }
/// ```
///
/// # Response
///
/// `200 OK` with `{ "status": "success" }` on a match. Failures map by
/// kind: 404 no record, 409 already verified, 403 locked out, 410 expired,
/// 401 wrong code (body carries `attempts_left`).
pub async fn verify_code<S, R>(
    state: web::Data<AppState<S, R>>,
    payload: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    S: SmsSender + 'static,
    R: OtpStore + 'static,
{
    // Housekeeping: sweep expired pending rows before any logic runs
    if let Err(e) = state.otp_service.purge_expired_pending().await {
        log::warn!("Opportunistic purge failed: {}", e);
    }

    if let Err(validation_errors) = payload.0.validate() {
        let fields: Vec<&str> = validation_errors.field_errors().keys().copied().collect();
        log::warn!("Rejected verify payload, invalid fields: {:?}", fields);
        return HttpResponse::BadRequest().json(
            ErrorBody::new("Missing required fields: number, code").with_detail(fields.join(", ")),
        );
    }

    match state
        .otp_service
        .verify_code(&payload.number, &payload.code)
        .await
    {
        Ok(()) => {
            log::info!(
                "Porting submission confirmed for: {}",
                mask_phone_number(&payload.number)
            );
            HttpResponse::Ok().json(StatusBody::new("success"))
        }
        Err(error) => {
            log::warn!(
                "Verification failed for: {}, error: {}",
                mask_phone_number(&payload.number),
                error
            );
            error_response(&error)
        }
    }
}
