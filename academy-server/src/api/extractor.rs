//! Request extractors that reject with an [`AppError`] body

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use shared::error::AppError;
use validator::Validate;

/// JSON body that has been deserialized *and* validated.
///
/// Malformed JSON, missing fields and failed `validator` rules all become a
/// 400 `ValidationFailed` before the handler runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                AppError::validation(rejection.body_text())
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Path parameters (`/{id}`) parsed like [`axum::extract::Path`].
///
/// A non-numeric id is a 400 `ValidationFailed` JSON body instead of
/// axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                // axum reports missing route params as 500
                if rejection.status().is_server_error() {
                    return AppError::internal(rejection.body_text());
                }
                tracing::debug!(error = %rejection.body_text(), "Rejected path parameters");
                AppError::validation(rejection.body_text())
            })?;
        Ok(Self(value))
    }
}
