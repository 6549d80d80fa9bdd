//! 翻译模块
//!
//! 运行时翻译请求管线的服务端部分，模块职责划分：
//! - **config**: 配置管理（默认值、TOML 文件、环境变量）
//! - **cache**: 按语言对和源文本缓存翻译结果
//! - **engine**: 外部翻译引擎边界
//! - **service**: 请求处理器，串联验证、缓存与引擎调用
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use langos::translation::{TranslationConfig, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TranslationConfig::load();
//! let service = TranslationService::new(config);
//!
//! let raw = serde_json::json!({"text": "Hello", "targetLocale": "es"});
//! let translated = service.handle(&raw).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod service;

pub use cache::{cache_key, CacheConfig, CacheStats, TranslationCache};
pub use config::{ConfigError, TranslationConfig};
pub use engine::{LingoEngine, LocalizeEngine};
pub use error::{TranslationError, TranslationResult};
pub use service::{ServiceStatsSnapshot, TranslationRequest, TranslationService};
