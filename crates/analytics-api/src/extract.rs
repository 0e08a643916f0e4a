//! Request extractors.
//!
//! [`ValidatedJson`] deserializes the body with Axum's [`Json`] extractor
//! and then runs the payload's [`Validate`] rules. Any failure short-circuits
//! into an [`ApiError`] before the handler body runs, so malformed input
//! never reaches the store.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// A JSON body that has passed its [`Validate`] rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
