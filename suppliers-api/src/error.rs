use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use suppliers_core::{CoreError, RepositoryError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed(String),
    UnsupportedMediaType(String),
    InternalServerError(String),
}

impl AppError {
    pub fn supplier_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Supplier with id '{}' was not found.", id))
    }

    /// Repository errors carry `CoreError` values when the failure is the
    /// caller's fault; anything else is an internal error.
    pub fn storage(err: RepositoryError) -> Self {
        match err.downcast::<CoreError>() {
            Ok(core) => (*core).into(),
            Err(other) => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::BadRequest(msg),
            CoreError::NotFound(msg) => AppError::NotFound(msg),
            CoreError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
            AppError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        }));

        (status, body).into_response()
    }
}
