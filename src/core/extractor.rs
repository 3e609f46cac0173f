use axum::{
    body::Body,
    extract::{
        rejection::FormRejection, FromRequest, FromRequestParts, OptionalFromRequestParts, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// URL-encoded form extractor that provides consistent error responses
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppFormRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppFormRejection(rejection)),
        }
    }
}

pub struct AppFormRejection(FormRejection);

impl IntoResponse for AppFormRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            FormRejection::FailedToDeserializeForm(err) => format!("Invalid form data: {}", err),
            FormRejection::FailedToDeserializeFormBody(err) => {
                format!("Invalid form body: {}", err)
            }
            FormRejection::InvalidFormContentType(err) => {
                format!("Invalid form content type: {}", err)
            }
            _ => "Failed to parse form body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// `Option<AuthenticatedUser>` for pages that render for anyone
impl<S> OptionalFromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthenticatedUser>().cloned())
    }
}
