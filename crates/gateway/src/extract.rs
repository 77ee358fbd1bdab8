//! Extractors that deserialize and validate request input
//!
//! Malformed input is rejected with the structured `AppError` body instead of
//! axum's plain-text rejections.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use socratic_common::errors::{AppError, Result};
use validator::{Validate, ValidationErrors};

/// Query string parsed into `T` and validated
pub struct ValidQuery<T>(pub T);

/// JSON body parsed into `T` and validated
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation {
                message: e.body_text(),
                field: None,
            })?;

        value.validate().map_err(invalid)?;
        Ok(Self(value))
    }
}

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation {
                message: e.body_text(),
                field: None,
            })?;

        value.validate().map_err(invalid)?;
        Ok(Self(value))
    }
}

fn invalid(errors: ValidationErrors) -> AppError {
    let field = errors.field_errors().keys().next().map(|name| name.to_string());
    AppError::Validation {
        message: errors.to_string(),
        field,
    }
}
