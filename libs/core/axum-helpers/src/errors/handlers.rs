use axum::{
    extract::OriginalUri,
    response::{IntoResponse, Response},
};
use std::any::Any;

use super::AppError;

/// Fallback for unmatched routes. Reports the full original path, including
/// any prefix stripped by nesting.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> Response {
    AppError::RouteNotFound(uri.path().to_string()).into_response()
}

/// Converts a caught handler panic into the generic 500 response.
///
/// Meant for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AppError::Panic(detail).into_response()
}
