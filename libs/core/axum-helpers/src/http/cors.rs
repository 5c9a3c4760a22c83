use axum::http::{HeaderValue, Method, header};
use core_config::Environment;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN` (comma-separated).
///
/// When the variable is unset, development falls back to a permissive layer
/// and production refuses to start.
pub fn create_cors_layer(environment: &Environment) -> io::Result<CorsLayer> {
    match std::env::var("CORS_ALLOWED_ORIGIN") {
        Ok(origins) => cors_for_origins(&origins),
        Err(_) if environment.is_development() => {
            warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin in development");
            Ok(create_permissive_cors_layer())
        }
        Err(_) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN environment variable is required in production. Example: CORS_ALLOWED_ORIGIN=https://example.com",
        )),
    }
}

/// CORS layer restricted to the given comma-separated origin list.
pub fn cors_for_origins(origins: &str) -> io::Result<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<_, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {e}"),
            )
        })?;

    if allowed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!(origins = %origins, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Allows any origin. Development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
