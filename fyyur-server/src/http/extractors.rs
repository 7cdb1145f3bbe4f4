//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Form;

use super::error::ApiError;
use crate::models::{FormFields, FromFormFields, ValidationError};

/// Decode an urlencoded body and validate it into `T`.
///
/// Repeated keys are preserved, so multi-select fields survive decoding.
pub struct SubmittedForm<T>(pub T);

impl<S, T> FromRequest<S> for SubmittedForm<T>
where
    S: Send + Sync,
    T: FromFormFields + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "rejected form body");
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "form",
                    reason: "expected an application/x-www-form-urlencoded body",
                })
            })?;

        let fields = FormFields::from(pairs);
        Ok(Self(T::from_fields(&fields)?))
    }
}

/// Integer entity id from the path. Anything else is treated as an unknown
/// page, matching an integer-typed route that simply does not match.
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = |id: String| ApiError::NotFound {
            resource: "page",
            id,
        };

        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found(parts.uri.path().to_owned()))?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| not_found(parts.uri.path().to_owned()))
    }
}
