use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use pv_core::repositories::otp::OtpStore;
use pv_core::services::otp::{OtpService, SmsSender};
use pv_shared::types::response::{ErrorBody, StatusBody};
use pv_shared::utils::phone::mask_phone_number;

use crate::dto::otp::RequestCodeRequest;
use crate::handlers::error::error_response;

/// Application state that holds shared services
pub struct AppState<S, R>
where
    S: SmsSender,
    R: OtpStore,
{
    pub otp_service: Arc<OtpService<S, R>>,
}

/// Handler for `POST /request`
///
/// Issues a fresh confirmation code for a porting submission and delivers
/// it via SMS.
///
/// # Request Body
///
/// ```json
/// {
///     "number": "15551234567",
///     "lsp": "Acme Telecom",
///     "order_ref": "R-20260807-1"
/// }
/// ```
///
/// # Response
///
/// `200 OK` with `{ "status": "sent" }`, or a mapped error: 400 for
/// missing fields, 502 when SMS delivery fails (the stored code is rolled
/// back first).
pub async fn request_code<S, R>(
    state: web::Data<AppState<S, R>>,
    payload: web::Json<RequestCodeRequest>,
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
        log::warn!("Rejected request payload, invalid fields: {:?}", fields);
        return HttpResponse::BadRequest().json(
            ErrorBody::new("Missing required fields: number, lsp, order_ref")
                .with_detail(fields.join(", ")),
        );
    }

    log::info!(
        "Processing code request for number: {}",
        mask_phone_number(&payload.number)
    );

    match state
        .otp_service
        .request_code(&payload.number, &payload.lsp, &payload.order_ref)
        .await
    {
        Ok(receipt) => {
            log::info!(
                "Confirmation code sent to: {}, message_id: {}",
                mask_phone_number(&payload.number),
                receipt.message_id
            );
            HttpResponse::Ok().json(StatusBody::new("sent"))
        }
        Err(error) => {
            log::error!(
                "Failed to issue code for: {}, error: {}",
                mask_phone_number(&payload.number),
                error
            );
            error_response(&error)
        }
    }
}
