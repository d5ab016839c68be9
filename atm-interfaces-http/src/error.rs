use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug)]
pub enum HttpError {
    Validation(String),
    NotFound,
    Internal(String),
}

impl From<atm_application::AppError> for HttpError {
    fn from(value: atm_application::AppError) -> Self {
        match value {
            atm_application::AppError::Validation(msg) => HttpError::Validation(msg),
            atm_application::AppError::ReportCreation => {
                HttpError::Internal(atm_application::AppError::ReportCreation.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
