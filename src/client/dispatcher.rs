//! 客户端调度器
//!
//! 通过 HTTP 调用翻译请求处理器，带独立的整体往返超时。
//! 客户端超时必须大于服务端的引擎超时，这样服务端的超时错误
//! 才能在客户端放弃之前送达。这是设计约束，不是巧合。

use std::time::Duration;

use serde_json::Value;

use crate::client::history::{HistoryEntry, HistoryLog, HistoryStatus, HistoryStorage};
use crate::env::{client as env, EnvVar};
use crate::locales::Locale;
use crate::translation::{TranslationError, TranslationResult};

/// 服务端消息缺失时的兜底错误文本
const FALLBACK_ERROR: &str = "Unable to translate right now.";

/// 客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 翻译接口地址
    pub endpoint: String,
    /// 整体往返超时（秒）
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: env::Endpoint::get()
                .unwrap_or_else(|_| "http://127.0.0.1:7080/api/translate".to_string()),
            timeout_secs: env::TimeoutSecs::get().unwrap_or(20),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 翻译客户端
///
/// 失败分类：
/// - 往返超时 → `RequestTimeout`（与服务端上报的错误可区分）
/// - 其他网络层失败 → `NetworkError`
/// - 非 2xx 响应 → 服务端的 `error` 消息原样透传，缺失时用兜底文本
pub struct TranslationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TranslationClient {
    pub fn new(config: ClientConfig) -> TranslationResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TranslationError::NetworkError(format!("client setup failed: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    /// 发起一次翻译请求
    pub async fn translate(
        &self,
        text: &str,
        target: Locale,
        source: Locale,
    ) -> TranslationResult<String> {
        let payload = serde_json::json!({
            "text": text,
            "targetLocale": target.code(),
            "sourceLocale": source.code(),
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::RequestTimeout
                } else {
                    TranslationError::NetworkError(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TranslationError::RequestTimeout
            } else {
                TranslationError::NetworkError(format!("invalid response: {}", e))
            }
        })?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(FALLBACK_ERROR)
                .to_string();
            return Err(TranslationError::EngineError(message));
        }

        body.get("translatedText")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| TranslationError::EngineError(FALLBACK_ERROR.to_string()))
    }

    /// 发起翻译并记录历史
    ///
    /// 每次调度都记录一条历史：成功时 `output` 为译文，失败时
    /// `output` 为错误消息本身，随后错误继续上抛。失败不会被
    /// 静默吞掉。
    pub async fn translate_logged<S: HistoryStorage>(
        &self,
        log: &HistoryLog<S>,
        text: &str,
        target: Locale,
        source: Locale,
    ) -> TranslationResult<String> {
        match self.translate(text, target, source).await {
            Ok(translated) => {
                log.append(HistoryEntry::new(
                    target,
                    text,
                    &translated,
                    HistoryStatus::Success,
                ));
                Ok(translated)
            }
            Err(error) => {
                log.append(HistoryEntry::new(
                    target,
                    text,
                    &error.to_string(),
                    HistoryStatus::Error,
                ));
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::config::constants::DEFAULT_ENGINE_TIMEOUT;

    #[test]
    fn test_client_timeout_exceeds_engine_timeout() {
        // 设计约束：客户端超时必须留出服务端上报超时错误的余量
        let config = ClientConfig::from_env();
        assert!(config.timeout() > DEFAULT_ENGINE_TIMEOUT);
    }

    #[test]
    fn test_default_endpoint_targets_translate_route() {
        if std::env::var(env::Endpoint::NAME).is_err() {
            let config = ClientConfig::from_env();
            assert!(config.endpoint.ends_with("/api/translate"));
        }
    }
}
