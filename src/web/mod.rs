//! Web 服务器模块
//!
//! 托管翻译请求处理器和发布就绪检查的 HTTP 服务

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::translation::{ConfigError, TranslationConfig, TranslationService};

/// Web 服务器
///
/// 翻译服务在 `new` 中创建一次并注入应用状态，进程退出时销毁，
/// 缓存不跨重启保留。
pub struct WebServer {
    config: WebConfig,
    service: Arc<TranslationService>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(
        config: WebConfig,
        translation_config: TranslationConfig,
    ) -> Result<Self, ConfigError> {
        translation_config.validate()?;

        if translation_config.api_key.is_none() {
            tracing::warn!("未配置 LINGO_API_KEY，翻译请求将返回 503");
        }

        Ok(Self {
            config,
            service: Arc::new(TranslationService::new(translation_config)),
        })
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> Result<(), ConfigError> {
        let app_state = Arc::new(AppState {
            service: Arc::clone(&self.service),
        });

        let app = create_router(app_state);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| ConfigError(format!("Failed to bind server: {}", e)))?;

        tracing::info!(
            "Web server starting at http://{}",
            self.config.listen_address()
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| ConfigError(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>) -> Router {
    create_routes().with_state(app_state).layer(CorsLayer::permissive())
}
