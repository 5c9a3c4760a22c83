use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{panic_response, route_not_found};
use crate::http::{cors::create_cors_layer, security::security_headers};
use axum::{Router, middleware};
use core_config::{Environment, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// Wraps the API routes with documentation UIs and cross-cutting middleware.
///
/// - `apis` is nested under `/api` and `root` is merged at the top level
///   (health, welcome). State must already be applied to both.
/// - Paths under `/api` match with or without a trailing slash.
/// - Swagger UI at `/api-docs`, the raw document at `/openapi.json`, plus
///   ReDoc (`/redoc`), RapiDoc (`/rapidoc`) and Scalar (`/scalar`).
/// - Unmatched paths fall through to [`route_not_found`].
/// - Layers: tracing, security headers, CORS, compression, panic catching.
///
/// # Errors
/// Fails when CORS cannot be configured; see
/// [`create_cors_layer`](crate::http::create_cors_layer).
///
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(nest((path = "/api/users", api = domain_users::ApiDoc)))]
/// struct ApiDoc;
///
/// let router = create_router::<ApiDoc>(api_routes, Router::new(), &environment)?;
/// ```
pub fn create_router<T>(apis: Router, root: Router, environment: &Environment) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = create_cors_layer(environment)?;
    let apis = NormalizePathLayer::trim_trailing_slash().layer(apis.fallback(route_not_found));

    let router = Router::new()
        .merge(SwaggerUi::new("/api-docs").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(root)
        .nest_service("/api", apis)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup` within
/// `shutdown_timeout`.
///
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     drop(mongo_client);
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Server starting");

    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server encountered an error"));

    info!(timeout = ?shutdown_timeout, "Running cleanup tasks");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(timeout = ?shutdown_timeout, "Cleanup exceeded timeout, forcing shutdown"),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    fn app() -> Router {
        let apis = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/boom", get(boom));
        let root = Router::new().route("/", get(|| async { "root" }));
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            create_router::<TestDoc>(apis, root, &Environment::Development).unwrap()
        })
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_are_nested() {
        let response = app()
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_routes_accept_trailing_slash() {
        let response = app()
            .oneshot(Request::get("/api/ping/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_api_route_with_trailing_slash() {
        let response = app()
            .oneshot(Request::get("/api/orders/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json(response).await;
        assert_eq!(body["message"], "The route /api/orders/ does not exist");
    }

    #[tokio::test]
    async fn test_swagger_ui_keeps_its_trailing_slash() {
        let response = app()
            .oneshot(Request::get("/api-docs/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_route_not_found() {
        let response = app()
            .oneshot(Request::get("/api/orders").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json(response).await;
        assert_eq!(body["error"], "Route not found");
        assert_eq!(body["message"], "The route /api/orders does not exist");
    }

    #[tokio::test]
    async fn test_panic_is_caught() {
        let response = app()
            .oneshot(Request::get("/api/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json(response).await;
        assert_eq!(body["error"], "Something went wrong!");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = app()
            .oneshot(Request::get(OPENAPI_JSON_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
