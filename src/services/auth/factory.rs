//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::auth::secret::SecretMaterial;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let secret = SecretMaterial::resolve(&config.supabase_jwt_key);

    // Only the decoding mode is reported, never the key itself.
    tracing::info!(
        encoding = ?secret.encoding(),
        issuer = %config.supabase_url,
        "resolved access token secret"
    );

    Arc::new(AuthService::new(&secret, config.supabase_url.clone()))
}
