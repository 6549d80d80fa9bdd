//! 翻译请求处理器
//!
//! 这是服务端的主入口：验证请求、查询缓存、在超时控制下调用
//! 外部引擎并回写缓存。单个请求内的步骤严格按文档顺序执行：
//! 验证 → 同语言短路 → 凭证检查 → 缓存查询 → 引擎调用。
//!
//! ## 生命周期
//!
//! 服务在进程启动时创建一次，通过共享状态注入到各个请求处理
//! 函数；进程退出即销毁，缓存不跨重启保留。测试应为每个用例
//! 构造独立实例，而不是依赖全局单例。
//!
//! ## 重试策略
//!
//! 处理器本身不重试：每个请求只触发一次引擎调用，重试与否由
//! 调用方决定。

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::locales::Locale;
use crate::translation::cache::TranslationCache;
use crate::translation::config::TranslationConfig;
use crate::translation::engine::{LingoEngine, LocalizeEngine};
use crate::translation::error::{TranslationError, TranslationResult};

/// 单个翻译请求的参数
///
/// 从原始 JSON 中提取并验证后的值，生存期仅限一次调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: Locale,
    pub target: Locale,
}

impl TranslationRequest {
    /// 从原始请求体提取并验证参数
    ///
    /// 验证顺序与错误映射：
    /// 1. 非 JSON 对象 → `InvalidRequest`
    /// 2. `text` 去除首尾空白后为空 → `MissingText`
    /// 3. 语言字段缺失或不是字符串时回退到默认语言
    /// 4. 语言代码不受支持 → `UnsupportedLocale`
    pub fn from_value(raw: &Value, default_locale: Locale) -> TranslationResult<Self> {
        let body = raw.as_object().ok_or(TranslationError::InvalidRequest)?;

        let text = body
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(TranslationError::MissingText);
        }

        let target = Self::extract_locale(body.get("targetLocale"), default_locale)?;
        let source = Self::extract_locale(body.get("sourceLocale"), default_locale)?;

        Ok(Self {
            text,
            source,
            target,
        })
    }

    fn extract_locale(field: Option<&Value>, default_locale: Locale) -> TranslationResult<Locale> {
        match field.and_then(Value::as_str) {
            Some(code) => Locale::from_code(code)
                .ok_or_else(|| TranslationError::UnsupportedLocale(code.to_string())),
            None => Ok(default_locale),
        }
    }
}

/// 服务统计信息（线程安全）
#[derive(Debug, Default)]
pub struct ServiceStats {
    requests: AtomicU64,
    identity_short_circuits: AtomicU64,
    cache_hits: AtomicU64,
    engine_calls: AtomicU64,
    failures: AtomicU64,
}

/// 统计信息快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceStatsSnapshot {
    pub requests: u64,
    pub identity_short_circuits: u64,
    pub cache_hits: u64,
    pub engine_calls: u64,
    pub failures: u64,
}

impl ServiceStats {
    fn snapshot(&self) -> ServiceStatsSnapshot {
        ServiceStatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            identity_short_circuits: self.identity_short_circuits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            engine_calls: self.engine_calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// 翻译服务
///
/// 进程级单例，持有缓存、配置和引擎。引擎通过 trait 对象注入，
/// 测试可以替换为模拟实现。
pub struct TranslationService {
    config: TranslationConfig,
    cache: TranslationCache,
    engine: Box<dyn LocalizeEngine>,
    stats: ServiceStats,
}

impl TranslationService {
    /// 用默认的 Lingo 引擎创建服务
    pub fn new(config: TranslationConfig) -> Self {
        let api_key = config.api_key.clone().unwrap_or_default();
        let engine = Box::new(LingoEngine::new(&config, api_key));
        Self::with_engine(config, engine)
    }

    /// 用注入的引擎创建服务
    pub fn with_engine(config: TranslationConfig, engine: Box<dyn LocalizeEngine>) -> Self {
        let cache = TranslationCache::new(config.cache_config());
        Self {
            config,
            cache,
            engine,
            stats: ServiceStats::default(),
        }
    }

    /// 处理一个原始 JSON 请求体
    pub async fn handle(&self, raw: &Value) -> TranslationResult<String> {
        let request = TranslationRequest::from_value(raw, self.config.default_locale)
            .map_err(|e| self.record_failure(e))?;
        self.handle_request(request).await
    }

    /// 处理一个已验证的翻译请求
    ///
    /// 状态机：已验证 → {同语言短路 | 缓存命中 | 引擎调用} →
    /// {成功 | 失败}。缓存只在引擎成功返回后写入。
    pub async fn handle_request(&self, request: TranslationRequest) -> TranslationResult<String> {
        self.stats.requests.fetch_add(1, Ordering::Relaxed);

        // 同语言翻译定义为恒等变换：不调用引擎也不写缓存
        if request.source == request.target {
            self.stats
                .identity_short_circuits
                .fetch_add(1, Ordering::Relaxed);
            return Ok(request.text);
        }

        // 凭证缺失是配置错误，映射为 503 而不是瞬时故障
        if !self.has_credential() {
            return Err(self.record_failure(TranslationError::ServiceUnavailable));
        }

        if let Some(cached) = self
            .cache
            .get(request.source, request.target, &request.text)
        {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                source = request.source.code(),
                target = request.target.code(),
                "缓存命中"
            );
            return Ok(cached);
        }

        self.stats.engine_calls.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            source = request.source.code(),
            target = request.target.code(),
            chars = request.text.len(),
            "调用外部翻译引擎"
        );

        // 超时先到时整个引擎 future 被丢弃，进行中的调用随之取消，
        // 不会留下仍在执行的工作
        let translated = match tokio::time::timeout(
            self.config.engine_timeout(),
            self.engine
                .localize_text(&request.text, request.source, request.target),
        )
        .await
        {
            Ok(Ok(translated)) => translated,
            Ok(Err(e)) => return Err(self.record_failure(e)),
            Err(elapsed) => return Err(self.record_failure(elapsed.into())),
        };

        self.cache
            .put(request.source, request.target, &request.text, &translated);

        Ok(translated)
    }

    /// 是否配置了外部引擎凭证
    pub fn has_credential(&self) -> bool {
        !self.config.api_key.as_deref().unwrap_or("").is_empty()
    }

    /// 服务使用的默认语言
    pub fn default_locale(&self) -> Locale {
        self.config.default_locale
    }

    /// 翻译缓存（测试与管理接口使用）
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// 统计信息快照
    pub fn stats(&self) -> ServiceStatsSnapshot {
        self.stats.snapshot()
    }

    fn record_failure(&self, error: TranslationError) -> TranslationError {
        self.stats.failures.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(status = error.status_code(), "翻译请求失败: {}", error);
        error
    }
}
