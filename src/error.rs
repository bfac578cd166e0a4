use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use serde_json::json;
use thiserror::Error;

/// Per-field validation messages, keyed by field name.
pub type ValidationMessages = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(ValidationMessages),
    #[error("entity not found")]
    NotFound,
    #[error("duplicate entry")]
    Duplicate,
    #[error("integrity violation")]
    Integrity,
    #[error("relation member not attached")]
    Removal,
    #[error("bad request body")]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Db(sea_orm::DbErr),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => Self::Integrity,
            _ => Self::Db(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Validation Error",
                    "messages": messages,
                    "error_type": "validation_error",
                })),
            )
                .into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Duplicate => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Duplicate Entry",
                    "message": "An entry with these details already exists",
                    "error_type": "duplicate_error",
                })),
            )
                .into_response(),
            Self::Integrity => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Database Integrity Error",
                    "message": "The request conflicts with database constraints",
                    "error_type": "integrity_error",
                })),
            )
                .into_response(),
            Self::Removal => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Removal Error",
                    "message": "Cannot remove the entity because it doesn't exist in the list",
                    "error_type": "removal_error",
                })),
            )
                .into_response(),
            Self::Body(rejection) => body_error(&rejection),
            Self::Db(err) => {
                tracing::error!(error = %err, "unhandled database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal Server Error",
                        "message": "An unexpected error occurred",
                        "error_type": "internal_error",
                    })),
                )
                    .into_response()
            }
        }
    }
}

// Missing fields surface as deserialization data errors; anything else wrong
// with the body is reported as an invalid value.
fn body_error(rejection: &JsonRejection) -> Response {
    let body = match rejection {
        JsonRejection::JsonDataError(_) => json!({
            "error": "Key Error",
            "message": "Required key(s) do not exist in request",
            "error_type": "internal_error",
        }),
        _ => json!({
            "error": "Invalid Value",
            "message": "One or more field values are invalid",
            "error_type": "value_error",
        }),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

pub type AppResult<T> = Result<T, AppError>;
