//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! ## Modules
//!
//! - **[`errors`]**: `AppError` and the JSON error body every endpoint returns
//! - **[`extractors`]**: ObjectId path, query string and validated JSON extractors
//! - **[`pagination`]**: lenient page/limit parsing and page metadata
//! - **[`input`]**: serde helpers that trim and normalize request text
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly with API docs, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, root_routes, &environment)?;
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod input;
pub mod pagination;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse, FieldError};
pub use errors::responses::{
    BadRequestResponse, DuplicateResponse, InternalServerErrorResponse, InvalidIdResponse, NotFoundResponse,
    ValidationFailedResponse,
};
pub use extractors::{ObjectIdPath, QueryParams, ValidatedJson};
pub use http::{create_cors_layer, security_headers};
pub use pagination::{PageMeta, PageRequest};
pub use server::{ShutdownCoordinator, create_production_app, create_router, shutdown_signal};
