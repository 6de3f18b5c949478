use crate::engine::ResultError;
use crate::orchestration::ApplyError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ApplyError> for AppError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Result(e @ ResultError::FightNotFound(_)) => AppError::NotFound(e.to_string()),
            ApplyError::Result(
                e @ (ResultError::InvalidResult { .. }
                | ResultError::InconsistentResult { .. }
                | ResultError::FightMismatch { .. }),
            ) => AppError::BadRequest(e.to_string()),
            ApplyError::Result(e @ ResultError::MissingStatsRecord(_)) => {
                AppError::Internal(e.to_string())
            }
            ApplyError::Db(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FightId, FighterId};

    #[test]
    fn test_apply_error_mapping() {
        let err: AppError = ApplyError::from(ResultError::InvalidResult {
            fight: FightId::new("f"),
            winner: FighterId::new("x"),
        })
        .into();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err: AppError = ApplyError::from(ResultError::FightNotFound(FightId::new("f"))).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError =
            ApplyError::from(ResultError::MissingStatsRecord(FighterId::new("a"))).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("fight f".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
