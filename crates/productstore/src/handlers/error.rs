use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use productstore_core::storage::repository_error_to_status_code;

use crate::controller::ControllerError;

/// Application error type that wraps `anyhow::Error`.
///
/// Controller errors and extractor rejections are classified into a status
/// code; anything else is a 500. Server errors get a generic body and the detail goes to the log.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(rejection) = self.0.downcast_ref::<PathRejection>() {
            return rejection.status();
        }
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return rejection.status();
        }

        match self.0.downcast_ref::<ControllerError>() {
            Some(ControllerError::MissingId) | Some(ControllerError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Some(ControllerError::Repository(e)) => {
                StatusCode::from_u16(repository_error_to_status_code(e))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            tracing::error!(error = %self.0, status = %status_code, "Request failed");
            "Something went wrong".to_string()
        } else {
            self.0.to_string()
        };

        (status_code, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
