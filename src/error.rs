use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("player not found")]
    NotFound,
    #[error("email is already in use")]
    Conflict,
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Conflict | ApiError::Validation(_) => {
                tracing::warn!("Rejected request: {}", self);
                StatusCode::BAD_REQUEST.into_response()
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = Json(ErrorResponse {
                    error: status.to_string(),
                    message: "Internal server error".to_string(),
                });
                (status, body).into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::Conflict,
            StoreError::Database(err) => ApiError::Database(err),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        let not_found = ApiError::NotFound.into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = ApiError::Conflict.into_response();
        assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);

        let invalid = ApiError::Validation("firstName".to_string()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_email_from_store_is_a_conflict() {
        assert!(matches!(
            ApiError::from(StoreError::DuplicateEmail),
            ApiError::Conflict
        ));
        assert!(matches!(
            ApiError::from(StoreError::Database(sqlx::Error::RowNotFound)),
            ApiError::Database(_)
        ));
    }

    #[test]
    fn database_errors_are_500() {
        let response = ApiError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
