//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use orgdir_core::Error;

/// An error returned by an API handler; a thin HTTP wrapper around the
/// core taxonomy.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self.0 {
      Error::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      Error::AccessDenied => {
        (StatusCode::FORBIDDEN, "access denied".to_string())
      }
      Error::NotFound(m) => (StatusCode::NOT_FOUND, format!("not found: {m}")),
      Error::Internal(m) => {
        // Log the detail; the response body carries only the condition.
        tracing::error!(error = %m, "internal error");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
