//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::health;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "REST API for users and products backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(health::health, health::welcome),
    components(schemas(
        health::HealthResponse,
        health::DatabaseStatus,
        health::WelcomeResponse,
        health::Endpoints
    )),
    nest(
        (path = "/api/users", api = domain_users::ApiDoc),
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "General", description = "Health and welcome endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;
