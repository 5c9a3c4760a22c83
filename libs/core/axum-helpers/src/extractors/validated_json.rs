//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed `Validate`.
///
/// Bodies that fail to parse (bad JSON, wrong field types, wrong content type)
/// become [`AppError::InvalidBody`]; rule violations become
/// [`AppError::Validation`].
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 2, max = 50))]
///     first_name: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     payload.first_name
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

        data.validate()?;

        Ok(ValidatedJson(data))
    }
}
