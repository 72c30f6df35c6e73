use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::SectorCapError;

/// Error rendered as a JSON `{"error": "..."}` body with a matching status.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<SectorCapError> for AppError {
    fn from(e: SectorCapError) -> Self {
        if e.is_upstream() {
            AppError::bad_gateway(format!("Error al actualizar los datos: {e}"))
        } else {
            AppError::internal(e.to_string())
        }
    }
}
