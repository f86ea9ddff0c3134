use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Decoded JWT payload. Keys are not predeclared; any subset may be present.
pub type ClaimSet = serde_json::Map<String, Value>;

const DEFAULT_NAME: &str = "User";
const DEFAULT_ROLE: &str = "user";

/// Typed view over the claims this service reads.
///
/// Every field is present-or-absent. A claim holding a value of the wrong
/// JSON type is decoded as absent instead of failing the whole view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileClaims {
    #[serde(default, deserialize_with = "lenient")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub full_name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub picture: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub app_role: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub app_metadata: Option<AppMetadata>,

    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
}

// Wrong-typed claim => None.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl ProfileClaims {
    pub fn from_claims(claims: &ClaimSet) -> Self {
        // Cannot fail in practice: every field is optional and lenient.
        serde_json::from_value(Value::Object(claims.clone())).unwrap_or_default()
    }

    /// `sub` when it is a string, otherwise `user_id`. Empty resolves to `None`.
    pub fn subject(&self) -> Option<&str> {
        self.sub
            .as_deref()
            .or(self.user_id.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Canonical user identity derived from a token's claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub role: String,
    pub created_at: String,
}

impl Identity {
    /// Maps heterogeneous claim names onto the canonical shape. Never fails.
    pub fn normalize(subject: &str, claims: &ClaimSet) -> Self {
        let claims = ProfileClaims::from_claims(claims);

        let email = claims.email.unwrap_or_default();

        let name = [claims.name, claims.user_name, claims.full_name]
            .into_iter()
            .flatten()
            .find(|n| !n.is_empty())
            .or_else(|| email_local_part(&email))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let avatar_url = claims.avatar_url.or(claims.picture).unwrap_or_default();

        let role = claims
            .role
            .or(claims.app_role)
            .or(claims.app_metadata.and_then(|m| m.role))
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        Self {
            id: subject.to_string(),
            email,
            name,
            avatar_url,
            role,
            created_at: claims.created_at.unwrap_or_default(),
        }
    }
}

fn email_local_part(email: &str) -> Option<String> {
    email
        .split('@')
        .next()
        .filter(|local| !local.is_empty())
        .map(str::to_string)
}
