/*
 * Responsibility
 * - Authorization ヘッダから Bearer トークン文字列を取り出す
 * - 形式は厳密に "Bearer <token>" (半角スペース 1 つで 2 分割、scheme は大文字小文字区別)
 * - トークン自体の形式チェックはしない (検証は AuthService の責務)
 */
use axum::http::{HeaderMap, header};

use crate::services::auth::AuthError;

const SCHEME: &str = "Bearer";

pub fn token_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::MissingHeader),
    };

    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(SCHEME), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
