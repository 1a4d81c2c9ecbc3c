use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::{ApiResponse, FieldErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {} field(s) invalid", .0.len())]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(field_errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse::<()>::invalid("The given data was invalid.".to_string(), field_errors),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiResponse::<()>::error(Some(msg), None),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<()>::error(Some(msg.clone()), Some(vec![msg])),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
