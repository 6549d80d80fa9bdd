//! 外部翻译引擎边界
//!
//! `LocalizeEngine` 是请求处理器与外部引擎之间唯一的接缝，
//! 对象安全，测试中可以替换为计数用的模拟引擎。
//! 引擎本身不重试也不限时：单次调用的超时由服务层统一控制。

use async_trait::async_trait;
use serde_json::Value;

use crate::locales::Locale;
use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};

/// 外部翻译引擎接口
///
/// 成功时返回目标语言文本；失败时返回携带人类可读消息的
/// `EngineError`，由处理器原样透传给调用方。
#[async_trait]
pub trait LocalizeEngine: Send + Sync {
    async fn localize_text(
        &self,
        text: &str,
        source: Locale,
        target: Locale,
    ) -> TranslationResult<String>;
}

/// Lingo 引擎的 HTTP 实现
///
/// POST `{text, sourceLocale, targetLocale, fast}` 到配置的地址，
/// Bearer 方式携带凭证，期望 2xx 响应体包含 `translatedText` 字段。
pub struct LingoEngine {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    fast: bool,
}

impl LingoEngine {
    pub fn new(config: &TranslationConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key,
            fast: config.fast_mode,
        }
    }
}

#[async_trait]
impl LocalizeEngine for LingoEngine {
    async fn localize_text(
        &self,
        text: &str,
        source: Locale,
        target: Locale,
    ) -> TranslationResult<String> {
        let payload = serde_json::json!({
            "text": text,
            "sourceLocale": source.code(),
            "targetLocale": target.code(),
            "fast": self.fast,
        });

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TranslationError::EngineError(format!("engine request failed: {}", e)))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::EngineError(format!("invalid engine response: {}", e)))?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("engine returned status {}", status.as_u16()));
            return Err(TranslationError::EngineError(message));
        }

        body.get("translatedText")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                TranslationError::EngineError("engine response missing translated text".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoEngine;

    #[async_trait]
    impl LocalizeEngine for EchoEngine {
        async fn localize_text(
            &self,
            text: &str,
            _source: Locale,
            target: Locale,
        ) -> TranslationResult<String> {
            Ok(format!("[{}] {}", target.code(), text))
        }
    }

    #[tokio::test]
    async fn test_engine_trait_is_object_safe() {
        let engine: Box<dyn LocalizeEngine> = Box::new(EchoEngine);
        let result = engine
            .localize_text("hello", Locale::En, Locale::Es)
            .await
            .unwrap();
        assert_eq!(result, "[es] hello");
    }
}
