/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: 起動時に一度だけ組み立てた AuthService (検証鍵は読み取り専用で共有)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
