/*
 * Responsibility
 * - GET /api/user-info の response DTO
 * - JSON のキーは camelCase (avatarUrl, createdAt)
 */
use serde::Serialize;

use crate::services::auth::Identity;

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub role: String,
    // Omitted entirely when only the subject is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Placeholder profile for a subject whose claims are unavailable.
    pub fn subject_only(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: "unknown@example.com".to_string(),
            name: "User".to_string(),
            avatar_url: String::new(),
            role: "user".to_string(),
            created_at: None,
        }
    }
}

impl From<Identity> for UserProfile {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            name: identity.name,
            avatar_url: identity.avatar_url,
            role: identity.role,
            created_at: Some(identity.created_at),
        }
    }
}
