/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 */
use crate::services::auth::{ClaimSet, VerifiedToken};

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `subject` は `sub` / `user_id` から解決済みの、空でないユーザーID
/// - `claims` は検証済み payload。subject しか分からない縮退モードでは `None`
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: String,
    pub claims: Option<ClaimSet>,
}

impl AuthCtx {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            claims: None,
        }
    }

    pub fn with_claims(mut self, claims: ClaimSet) -> Self {
        self.claims = Some(claims);
        self
    }
}

impl From<VerifiedToken> for AuthCtx {
    fn from(token: VerifiedToken) -> Self {
        Self::new(token.subject).with_claims(token.claims)
    }
}
