/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body `{"error": "..."}`)
 * - AuthError を 401 / 500 に振り分ける
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(e) if e.is_client_error() => StatusCode::UNAUTHORIZED,
            AppError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_failures_are_unauthorized() {
        for err in [
            AuthError::MissingHeader,
            AuthError::MalformedHeader,
            AuthError::MissingSubject,
        ] {
            assert_eq!(AppError::from(err).status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn consistency_failure_is_a_server_error() {
        let err = AppError::from(AuthError::InternalConsistency);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "user id not found in request context");
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            AppError::from(AuthError::MalformedHeader).to_string(),
            "authorization header format must be Bearer {token}"
        );
        assert_eq!(
            AppError::from(AuthError::MissingSubject).to_string(),
            "invalid token: missing subject"
        );
    }
}
