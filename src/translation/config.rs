//! 翻译服务配置
//!
//! 配置按「默认值 → 可选 TOML 文件 → 环境变量」三层合并，
//! 环境变量优先级最高。凭证缺失不是加载错误：它在请求阶段
//! 映射为 503，以便服务在未配置时仍能启动并报告就绪状态。

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::{translation as env, EnvVar};
use crate::locales::{Locale, DEFAULT_LOCALE};
use crate::translation::cache::CacheConfig;

/// 配置常量
pub mod constants {
    use std::time::Duration;

    /// 外部翻译引擎的默认地址
    pub const DEFAULT_API_URL: &str = "https://engine.lingo.dev/i18n";

    /// 服务端单次引擎调用的超时
    pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(15);

    /// 缓存默认容量与存活时间
    pub const DEFAULT_CACHE_SIZE: usize = 1024;
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

    /// 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &["langos.toml", ".langos.toml"];
}

/// 配置错误
#[derive(Error, Debug, Clone)]
#[error("Configuration error: {0}")]
pub struct ConfigError(pub String);

/// 翻译服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// 外部引擎凭证，`None` 表示未配置
    pub api_key: Option<String>,
    /// 外部引擎地址
    pub api_url: String,
    /// 请求中省略语言字段时的回退语言
    pub default_locale: Locale,
    /// 引擎调用超时（秒）
    pub engine_timeout_secs: u64,
    /// 引擎快速模式开关
    pub fast_mode: bool,
    /// 缓存容量上限
    pub cache_size: usize,
    /// 缓存条目存活时间（秒）
    pub cache_ttl_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: constants::DEFAULT_API_URL.to_string(),
            default_locale: DEFAULT_LOCALE,
            engine_timeout_secs: constants::DEFAULT_ENGINE_TIMEOUT.as_secs(),
            fast_mode: true,
            cache_size: constants::DEFAULT_CACHE_SIZE,
            cache_ttl_secs: constants::DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

impl TranslationConfig {
    /// 加载完整配置：默认值、配置文件、环境变量依次覆盖
    ///
    /// 文件解析失败时告警并继续按默认值运行，配置缺失不阻止启动。
    pub fn load() -> Self {
        let mut config = match Self::find_config_file() {
            Some(path) => match Self::from_file(&path) {
                Ok(config) => {
                    tracing::debug!("已加载配置文件: {}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("配置文件 {} 解析失败，使用默认配置: {}", path, e);
                    Self::default()
                }
            },
            None => Self::default(),
        };

        config.apply_env_overrides();
        config
    }

    /// 从 TOML 文件读取配置
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("cannot read '{}': {}", path, e)))?;
        toml::from_str(&contents).map_err(|e| ConfigError(format!("cannot parse '{}': {}", path, e)))
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::ApiKey::get() {
            self.api_key = Some(api_key);
        }
        if let Ok(api_url) = env::ApiUrl::get() {
            self.api_url = api_url;
        }
        if let Ok(secs) = env::EngineTimeoutSecs::get() {
            self.engine_timeout_secs = secs;
        }
        if let Ok(size) = env::CacheSize::get() {
            self.cache_size = size;
        }
        if let Ok(secs) = env::CacheTtlSecs::get() {
            self.cache_ttl_secs = secs;
        }
        if let Ok(code) = env::DefaultLocale::get() {
            if let Some(locale) = Locale::from_code(&code) {
                self.default_locale = locale;
            }
        }
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine_timeout_secs == 0 {
            return Err(ConfigError("engine timeout cannot be 0".to_string()));
        }
        if self.cache_size == 0 {
            return Err(ConfigError("cache size cannot be 0".to_string()));
        }
        if self.api_url.is_empty() {
            return Err(ConfigError("engine API URL cannot be empty".to_string()));
        }
        Ok(())
    }

    /// 引擎调用超时
    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }

    /// 导出缓存配置
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_size: self.cache_size,
            ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }

    fn find_config_file() -> Option<String> {
        constants::CONFIG_PATHS
            .iter()
            .find(|path| Path::new(path).exists())
            .map(|path| path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.engine_timeout(), Duration::from_secs(15));
        assert!(config.api_key.is_none());
        assert!(config.fast_mode);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = TranslationConfig {
            engine_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_cache() {
        let config = TranslationConfig {
            cache_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_with_partial_file() {
        // 缺失的字段回退到默认值
        let parsed: TranslationConfig =
            toml::from_str("api_url = \"https://example.com/translate\"\ndefault_locale = \"de\"")
                .unwrap();
        assert_eq!(parsed.api_url, "https://example.com/translate");
        assert_eq!(parsed.default_locale, Locale::De);
        assert_eq!(parsed.cache_size, constants::DEFAULT_CACHE_SIZE);
    }
}
