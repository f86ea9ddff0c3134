use std::convert::Infallible;

use axum::extract::OptionalFromRequestParts;
use axum::http::request::Parts;

use crate::state::AppState;

use super::AuthCtx;

/// Handler で、 AuthCtx を受け取るための extractor
///
/// `Option<AuthCtxExtractor>` として受け取る。middleware が AuthCtx を
/// request.extensions() に insert していなければ `None` になり、
/// どう扱うか (500 にする等) は handler 側が決める。
pub struct AuthCtxExtractor(pub AuthCtx);

impl OptionalFromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor))
    }
}
