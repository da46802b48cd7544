use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use log::info;
use std::sync::Arc;

use pv_core::services::otp::{OtpService, OtpSweeper, OtpSweeperConfig};
use pv_infra::config::SmsConfig;
use pv_infra::database::{DatabasePool, MySqlOtpStore};
use pv_infra::sms::{create_sms_service, SmsSenderAdapter};
use pv_shared::config::{DatabaseConfig, OtpConfig};
use pv_shared::types::response::ErrorBody;

mod config;
mod dto;
mod handlers;
mod middleware;
mod routes;

use config::ApiConfig;
use routes::otp::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting PortVerify API Server");

    let api_config = ApiConfig::from_env();
    let otp_config = OtpConfig::from_env();

    // Database pool and record store
    let db = DatabasePool::new(&DatabaseConfig::from_env())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let store = Arc::new(MySqlOtpStore::new(db.get_pool().clone()));

    // Outbound SMS channel
    let sms_service = create_sms_service(&SmsConfig::from_env());
    let sms_sender = Arc::new(SmsSenderAdapter::new(sms_service));

    // Lifecycle service shared by the handlers
    let otp_service = Arc::new(OtpService::new(
        sms_sender,
        store.clone(),
        otp_config.clone(),
    ));

    // Periodic purge, independent of request traffic
    let sweeper = Arc::new(OtpSweeper::new(
        store,
        otp_config,
        OtpSweeperConfig {
            interval_seconds: api_config.sweep_interval_seconds,
            enabled: true,
        },
    ));
    sweeper.start_background_task();

    let state = web::Data::new(AppState { otp_service });

    let bind_address = api_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let allowed_origin = api_config.allowed_origin.clone();
    let basic_user = api_config.basic_auth_user.clone();
    let basic_pass = api_config.basic_auth_pass.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(middleware::BasicAuth::new(
                basic_user.clone(),
                basic_pass.clone(),
            ))
            // Registered last so preflight is answered before the auth gate
            .wrap(middleware::create_cors(&allowed_origin))
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
            .configure(routes::otp::configure::<SmsSenderAdapter, MySqlOtpStore>)
            .route("/health", web::get().to(health_check))
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "portverify-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Not found"))
}
