// ABOUTME: Shared response envelope and error mapping for the guestd API.
// ABOUTME: Every endpoint answers {success, data} or {success: false, error}.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guestd_core::ValidationError;
use guestd_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Success envelope wrapping every 2xx payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// API-level failure, mapped to a status code and the error envelope.
/// The display string is exactly what the client sees.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body")]
    InvalidBody,

    #[error("invalid guest id")]
    InvalidId,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("guest not found")]
    NotFound,

    #[error("email or id card already in use")]
    Conflict,

    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody | ApiError::InvalidId | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

/// Translate a store failure under a fixed operation context. NotFound and
/// Conflict keep their meaning; anything else is logged server-side and
/// surfaced as a generic 500 message, the original error swallowed.
pub fn store_err(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
    move |err| match err {
        StoreError::NotFound => ApiError::NotFound,
        StoreError::Conflict(detail) => {
            tracing::debug!("{context}: {detail}");
            ApiError::Conflict
        }
        StoreError::Sqlite(e) => {
            tracing::error!("{context}: {e}");
            ApiError::Internal(context)
        }
    }
}

/// Json extractor whose rejection speaks the error envelope instead of
/// axum's default plain-text body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!("rejected request body: {rejection}");
                Err(ApiError::InvalidBody)
            }
        }
    }
}
