/*
 * Responsibility
 * - GET /api/user-info (ログインユーザーのプロフィール)
 * - AuthCtx (middleware が検証済み) から UserProfile を組み立てる
 * - claims が無い縮退モードでも subject だけで応答する
 */
use axum::Json;

use crate::api::dto::user_info::{UserInfoResponse, UserProfile};
use crate::api::extractors::{AuthCtx, AuthCtxExtractor};
use crate::error::AppError;
use crate::services::auth::{AuthError, Identity};

pub async fn user_info(
    auth: Option<AuthCtxExtractor>,
) -> Result<Json<UserInfoResponse>, AppError> {
    let user = assemble(auth.as_ref().map(|AuthCtxExtractor(ctx)| ctx)).map_err(|err| {
        tracing::error!(error = %err, "user-info reached without an authenticated subject");
        err
    })?;

    Ok(Json(UserInfoResponse { user }))
}

/// Builds the profile for the authenticated subject.
///
/// A missing context, or one without a subject, means the auth middleware
/// did not run for this route; that is a server defect, not a client error.
pub fn assemble(ctx: Option<&AuthCtx>) -> Result<UserProfile, AuthError> {
    let ctx = ctx
        .filter(|ctx| !ctx.subject.is_empty())
        .ok_or(AuthError::InternalConsistency)?;

    let profile: UserProfile = match &ctx.claims {
        Some(claims) => Identity::normalize(&ctx.subject, claims).into(),
        None => {
            tracing::warn!(subject = %ctx.subject, "claims not available, answering with subject only");
            UserProfile::subject_only(ctx.subject.clone())
        }
    };

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn claim_set(value: Value) -> crate::services::auth::ClaimSet {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn full_claims_are_normalized_with_created_at() {
        let ctx = AuthCtx::new("u1").with_claims(claim_set(json!({
            "sub": "u1",
            "email": "jane@example.com",
            "full_name": "Jane Doe",
            "picture": "https://img.example/jane.png",
            "app_metadata": {"role": "admin"},
            "created_at": "2024-01-02T03:04:05Z"
        })));

        let profile = assemble(Some(&ctx)).unwrap();
        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({
                "id": "u1",
                "email": "jane@example.com",
                "name": "Jane Doe",
                "avatarUrl": "https://img.example/jane.png",
                "role": "admin",
                "createdAt": "2024-01-02T03:04:05Z"
            })
        );
    }

    #[test]
    fn created_at_key_is_present_even_when_empty() {
        let ctx = AuthCtx::new("u1").with_claims(claim_set(json!({"sub": "u1"})));

        let value = serde_json::to_value(assemble(Some(&ctx)).unwrap()).unwrap();
        assert_eq!(value["createdAt"], json!(""));
        assert_eq!(value["name"], json!("User"));
        assert_eq!(value["email"], json!(""));
    }

    #[test]
    fn subject_only_context_degrades_gracefully() {
        let profile = assemble(Some(&AuthCtx::new("u1"))).unwrap();

        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({
                "id": "u1",
                "email": "unknown@example.com",
                "name": "User",
                "avatarUrl": "",
                "role": "user"
            })
        );
    }

    #[test]
    fn missing_subject_is_an_internal_consistency_failure() {
        assert!(matches!(
            assemble(None),
            Err(AuthError::InternalConsistency)
        ));
        assert!(matches!(
            assemble(Some(&AuthCtx::new(""))),
            Err(AuthError::InternalConsistency)
        ));
    }
}
