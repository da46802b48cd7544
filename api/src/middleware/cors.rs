//! CORS middleware configuration for cross-origin requests.
//!
//! Submission forms are served from a separate origin, so the API answers
//! preflight requests and labels its responses with the configured origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Creates a CORS middleware instance for the given allowed origin
///
/// `*` allows any origin; anything else restricts responses to exactly
/// that origin. Only the two POST endpoints and their preflights exist,
/// so the method and header lists stay narrow.
pub fn create_cors(allowed_origin: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600);

    if allowed_origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(allowed_origin)
    }
}
