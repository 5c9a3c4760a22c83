//! Custom extractors for Axum handlers.
//!
//! Both reject with [`AppError`](crate::errors::AppError) so malformed input
//! produces the same error body as every other failure.

pub mod object_id_path;
pub mod query_params;
pub mod validated_json;

pub use object_id_path::ObjectIdPath;
pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
