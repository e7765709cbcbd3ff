use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::settings::AppConfig;

const MAX_AGE_SECS: usize = 3600;

/// CORS policy for the public frontend. `*` allows any origin and is
/// rejected by config validation in production.
pub fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(MAX_AGE_SECS);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
