use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use checkin_core::CoreError;
use serde_json::json;

const SERVER_ERROR: &str = "Server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status and client-facing message. Internal details are logged here
    /// and never returned.
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            CoreError::NotFound(msg) => AppError::NotFound(msg),
            CoreError::Storage(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Bookings routes: `{"message": ...}`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Check-in routes wrap the same taxonomy in `{"success": false, "error": ...}`.
#[derive(Debug)]
pub struct CheckinError(pub AppError);

impl From<AppError> for CheckinError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CoreError> for CheckinError {
    fn from(err: CoreError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for CheckinError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
