/*
 * Responsibility
 * - bearer 認証パイプラインが上位に伝える失敗の意味
 * - HTTP status への対応付けは AppError 側
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is required")]
    MissingHeader,

    #[error("authorization header format must be Bearer {{token}}")]
    MalformedHeader,

    // Both trust tiers rejected the token; carries the error of the last attempt.
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: missing subject")]
    MissingSubject,

    // The handler ran without the context the middleware guarantees.
    #[error("user id not found in request context")]
    InternalConsistency,
}

impl AuthError {
    /// `true` when the failure is a bad client credential rather than a server defect.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::InternalConsistency)
    }
}
