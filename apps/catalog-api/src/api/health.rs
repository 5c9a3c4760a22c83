//! Health check and welcome endpoints

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "API is running successfully")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "development")]
    pub environment: String,
    pub database: DatabaseStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Endpoints {
    #[schema(example = "/api/users")]
    pub users: String,
    #[schema(example = "/api/products")]
    pub products: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub documentation: String,
    pub endpoints: Endpoints,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .with_state(state)
}

/// Liveness plus database connectivity; always 200
#[utoipa::path(
    get,
    path = "/health",
    tag = "General",
    responses((status = 200, description = "API is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if database::mongodb::check_health(&state.mongo_client).await {
        DatabaseStatus::Connected
    } else {
        DatabaseStatus::Disconnected
    };

    Json(HealthResponse {
        status: "success".to_string(),
        message: "API is running successfully".to_string(),
        timestamp: Utc::now(),
        environment: state.config.environment.to_string(),
        database,
    })
}

/// Welcome message with links to the docs and resources
#[utoipa::path(
    get,
    path = "/",
    tag = "General",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse))
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Catalog API".to_string(),
        documentation: "Visit /api-docs for API documentation".to_string(),
        endpoints: Endpoints {
            users: "/api/users".to_string(),
            products: "/api/products".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::{Client, options::ClientOptions};
    use tower::ServiceExt;

    /// State whose client points at a closed port and gives up quickly
    async fn unreachable_state() -> AppState {
        let url = "mongodb://127.0.0.1:1/catalog?serverSelectionTimeoutMS=100";
        let options = ClientOptions::parse(url).await.unwrap();
        let mongo_client = Client::with_options(options).unwrap();

        AppState {
            config: Config {
                app: app_info!(),
                mongodb: MongoConfig::new(url),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db: mongo_client.database("catalog"),
            mongo_client,
        }
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_disconnected_database() {
        let app = router(unreachable_state().await);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["environment"], "development");
        assert_eq!(body["database"], "disconnected");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_welcome_lists_endpoints() {
        let app = router(unreachable_state().await);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["documentation"], "Visit /api-docs for API documentation");
        assert_eq!(body["endpoints"]["users"], "/api/users");
        assert_eq!(body["endpoints"]["products"], "/api/products");
    }
}
