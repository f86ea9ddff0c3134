//! access token (共有シークレット署名の JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を取り出す (bearer_auth)
//! - 署名検証 + subject 解決 (AuthService)
//! - 失敗時は handler を呼ばずに 401 で打ち切る

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::middleware::bearer_auth;
use crate::state::AppState;

/// 保護したい Router に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/user-info", get(user_info));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// router = router.nest("/api", protected);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = match bearer_auth::token_from_headers(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(error = %err, "bearer token extraction failed");
            return Err(err.into());
        }
    };

    let verified = match state.auth.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "access token verification failed"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(subject = %verified.subject, "access token verified");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::from(verified));

    Ok(next.run(req).await)
}
