//! 集成测试公共设施
//!
//! 提供可编程的模拟引擎和服务构造辅助函数。

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use langos::locales::Locale;
use langos::translation::{
    LocalizeEngine, TranslationConfig, TranslationError, TranslationResult, TranslationService,
};

type Responder = Box<dyn Fn(&str, Locale, Locale) -> TranslationResult<String> + Send + Sync>;

/// 可编程的模拟翻译引擎
///
/// 记录调用次数，按注入的闭包产生响应，可选延迟用于超时测试。
pub struct MockEngine {
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
    respond: Responder,
}

impl MockEngine {
    /// 固定返回同一段译文
    pub fn returning(translated: &str) -> (Self, Arc<AtomicUsize>) {
        let translated = translated.to_string();
        Self::with_responder(None, Box::new(move |_, _, _| Ok(translated.clone())))
    }

    /// 回显输入，译文带上目标语言前缀
    pub fn echoing() -> (Self, Arc<AtomicUsize>) {
        Self::with_responder(
            None,
            Box::new(|text, _, target| Ok(format!("[{}] {}", target.code(), text))),
        )
    }

    /// 总是失败
    pub fn failing(error: TranslationError) -> (Self, Arc<AtomicUsize>) {
        Self::with_responder(None, Box::new(move |_, _, _| Err(error.clone())))
    }

    /// 延迟指定时长后才返回，用于触发服务端超时
    pub fn slow(delay: Duration, translated: &str) -> (Self, Arc<AtomicUsize>) {
        let translated = translated.to_string();
        Self::with_responder(
            Some(delay),
            Box::new(move |_, _, _| Ok(translated.clone())),
        )
    }

    fn with_responder(delay: Option<Duration>, respond: Responder) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                delay,
                respond,
            },
            calls,
        )
    }
}

#[async_trait]
impl LocalizeEngine for MockEngine {
    async fn localize_text(
        &self,
        text: &str,
        source: Locale,
        target: Locale,
    ) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(text, source, target)
    }
}

/// 测试配置：可控的凭证与 1 秒引擎超时
pub fn test_config(api_key: Option<&str>) -> TranslationConfig {
    TranslationConfig {
        api_key: api_key.map(str::to_string),
        engine_timeout_secs: 1,
        ..Default::default()
    }
}

/// 用模拟引擎构造服务
pub fn service_with(engine: MockEngine, api_key: Option<&str>) -> TranslationService {
    TranslationService::with_engine(test_config(api_key), Box::new(engine))
}
