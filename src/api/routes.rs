/*
 * Responsibility
 * - URL 構造を定義
 * - /health は認証なし、/api 以下は Bearer 必須 (auth middleware を nest した Router にだけ掛ける)
 */
use axum::{Router, routing::get};

use crate::api::handlers::{health::health, user_info::user_info};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/user-info", get(user_info));
    let protected = middleware::auth::access::apply(protected, state);

    Router::new()
        .route("/health", get(health))
        .nest("/api", protected)
}
