//! HTTP handlers for the Users API

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
        BadRequestResponse, DuplicateResponse, InternalServerErrorResponse, InvalidIdResponse,
        NotFoundResponse, ValidationFailedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    CreateUser, DeletedUserResponse, UpdateUser, UserListQuery, UserListResponse, UserPagination,
    UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(
            UserResponse, CreateUser, UpdateUser, UserListResponse, UserPagination,
            DeletedUserResponse, ErrorResponse, FieldError
        ),
        responses(
            BadRequestResponse,
            ValidationFailedResponse,
            InvalidIdResponse,
            DuplicateResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<UserService<R>>>;

/// Users router; mount it under `/api/users`.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// List users, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(UserListQuery),
    responses(
        (status = 200, description = "One page of users", body = UserListResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): SharedService<R>,
    QueryParams(query): QueryParams<UserListQuery>,
) -> Result<Json<UserListResponse>, AppError> {
    let (users, meta) = service
        .list_users(query)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch users"))?;

    Ok(Json(UserListResponse::new(users, meta)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = ValidationFailedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): SharedService<R>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = service
        .create_user(input)
        .await
        .map_err(|e| e.into_app_error("Failed to create user"))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<Json<UserResponse>, AppError> {
    let user = service
        .get_user(id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch user"))?;

    Ok(Json(user.into()))
}

/// Update a user; only the provided fields change
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = service
        .update_user(id, input)
        .await
        .map_err(|e| e.into_app_error("Failed to update user"))?;

    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponse),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): SharedService<R>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<Json<DeletedUserResponse>, AppError> {
    let user = service
        .delete_user(id)
        .await
        .map_err(|e| e.into_app_error("Failed to delete user"))?;

    Ok(Json(user.into()))
}
