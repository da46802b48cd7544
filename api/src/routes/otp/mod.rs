//! OTP route handlers
//!
//! Two endpoints drive the whole flow:
//! - `POST /request` issues a fresh code and delivers it via SMS
//! - `POST /otp` verifies a supplied code
//!
//! Both handlers sweep stale pending records before running any logic,
//! mirroring the background sweeper, so the purge happens on every
//! request-handling cycle regardless of traffic shape.

pub mod request_code;
pub mod verify_code;

pub use request_code::AppState;

use actix_web::{web, HttpResponse};

use pv_core::repositories::otp::OtpStore;
use pv_core::services::otp::SmsSender;
use pv_shared::types::response::ErrorBody;

/// Register the OTP endpoints on an application
pub fn configure<S, R>(cfg: &mut web::ServiceConfig)
where
    S: SmsSender + 'static,
    R: OtpStore + 'static,
{
    cfg.service(
        web::resource("/request")
            .route(web::post().to(request_code::request_code::<S, R>))
            .route(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/otp")
            .route(web::post().to(verify_code::verify_code::<S, R>))
            .route(web::route().to(method_not_allowed)),
    );
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorBody::new("Method not allowed"))
}
