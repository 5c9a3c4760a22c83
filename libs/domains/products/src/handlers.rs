//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ErrorResponse, FieldError, ObjectIdPath, QueryParams, ValidatedJson,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, InvalidIdResponse, NotFoundResponse,
        ValidationFailedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CreateProduct, DeletedProductResponse, ProductCategory, ProductListQuery,
    ProductListResponse, ProductPagination, ProductResponse, StockStatus, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product, delete_product),
    components(
        schemas(
            ProductResponse, CreateProduct, UpdateProduct, ProductCategory, StockStatus,
            ProductListResponse, ProductPagination, DeletedProductResponse,
            ErrorResponse, FieldError
        ),
        responses(
            BadRequestResponse,
            ValidationFailedResponse,
            InvalidIdResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<ProductService<R>>>;

/// Products router; mount it under `/api/products`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with optional filters, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): SharedService<R>,
    QueryParams(query): QueryParams<ProductListQuery>,
) -> Result<Json<ProductListResponse>, AppError> {
    let (products, meta) = service
        .list_products(query)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch products"))?;

    Ok(Json(ProductListResponse::new(products, meta)))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): SharedService<R>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = service
        .create_product(input)
        .await
        .map_err(|e| e.into_app_error("Failed to create product"))?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<Json<ProductResponse>, AppError> {
    let product = service
        .get_product(id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch product"))?;

    Ok(Json(product.into()))
}

/// Update a product; only the provided fields change
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = service
        .update_product(id, input)
        .await
        .map_err(|e| e.into_app_error("Failed to update product"))?;

    Ok(Json(product.into()))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId")),
    responses(
        (status = 200, description = "Product deleted", body = DeletedProductResponse),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<Json<DeletedProductResponse>, AppError> {
    let product = service
        .delete_product(id)
        .await
        .map_err(|e| e.into_app_error("Failed to delete product"))?;

    Ok(Json(product.into()))
}
