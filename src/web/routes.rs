//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建路由结构
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // 核心翻译端点
        .route("/api/translate", post(translate_text))
        // 不带前缀的别名，兼容直接按线格式调用的客户端
        .route("/translate", post(translate_text))
        // 只读辅助端点
        .route("/api/release-readiness", get(release_readiness))
        .route("/api/locales", get(list_locales))
}
