use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{
    Algorithm, DecodingKey,
    errors::{Error as JwtError, ErrorKind},
};

use crate::services::auth::claims::{ClaimSet, ProfileClaims};
use crate::services::auth::error::AuthError;
use crate::services::auth::secret::SecretMaterial;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// AuthService が返す「検証済み・アプリ側で使う型」
///
/// - `subject` は `sub` (文字列の場合) か `user_id` から解決した、空でない ID
/// - `claims` は payload 全体 (ClaimsNormalizer 用)
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub subject: String,
    pub claims: ClaimSet,
}

/// Shared-secret access-token verifier.
///
/// Signature validity and structural well-formedness are the only checks.
/// `exp`, `nbf`, `iss` and `aud` are not validated.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    issuer: String,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &SecretMaterial, issuer: impl Into<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Verify the signature and decode the payload.
    ///
    /// Tries the HMAC family first. A token declaring any other algorithm, or
    /// one the HMAC attempt rejects, is retried under its own declared
    /// algorithm against the same key.
    pub fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        match self.verify_hmac(token) {
            Some(Ok(claims)) => return Ok(claims),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "hmac verification failed, retrying with declared algorithm");
            }
            None => {
                tracing::debug!("token does not declare an hmac algorithm, retrying with declared algorithm");
            }
        }

        self.verify_declared(token).map_err(AuthError::InvalidToken)
    }

    /// Verify, then resolve the subject. This is the entry-point for middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let claims = self.verify(token)?;

        let subject = ProfileClaims::from_claims(&claims)
            .subject()
            .map(str::to_string)
            .ok_or(AuthError::MissingSubject)?;

        Ok(VerifiedToken { subject, claims })
    }

    // `None` means the attempt does not apply (non-HMAC header).
    fn verify_hmac(&self, token: &str) -> Option<Result<ClaimSet, JwtError>> {
        let header = match jsonwebtoken::decode_header(token) {
            Ok(header) => header,
            Err(err) => return Some(Err(err)),
        };

        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return None;
        }

        Some(self.decode(token, header.alg))
    }

    fn verify_declared(&self, token: &str) -> Result<ClaimSet, JwtError> {
        let header = jsonwebtoken::decode_header(token)?;
        self.decode(token, header.alg)
    }

    // Signature check only. The payload is parsed as a plain JSON object so
    // registered claims (`sub`, `exp`, ...) of any JSON type are accepted.
    fn decode(&self, token: &str, algorithm: Algorithm) -> Result<ClaimSet, JwtError> {
        let (message, signature) = token.rsplit_once('.').ok_or(ErrorKind::InvalidToken)?;
        let (_, payload) = message.split_once('.').ok_or(ErrorKind::InvalidToken)?;
        if payload.contains('.') {
            return Err(ErrorKind::InvalidToken.into());
        }

        if !jsonwebtoken::crypto::verify(signature, message.as_bytes(), &self.decoding_key, algorithm)? {
            return Err(ErrorKind::InvalidSignature.into());
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| JwtError::from(ErrorKind::InvalidToken))?;

        Ok(serde_json::from_slice::<ClaimSet>(&payload)?)
    }
}
