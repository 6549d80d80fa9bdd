//! 翻译模块统一错误处理
//!
//! 错误的显示文本就是通过 HTTP 返回、并写入客户端历史记录的
//! 用户可见消息，因此保持稳定，修改前先检查测试和前端依赖。

use thiserror::Error;

/// 翻译错误类型
///
/// 前六个变体由请求处理器产生，后两个由客户端调度器产生。
/// 处理器的每条失败路径都映射到一个确定的 HTTP 状态码，
/// 不存在未分类的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 请求体不是合法的 JSON 对象
    #[error("Invalid request body.")]
    InvalidRequest,

    /// 待翻译文本缺失或去除空白后为空
    #[error("Text is required.")]
    MissingText,

    /// 语言代码不在受支持的集合中
    #[error("Unsupported locale.")]
    UnsupportedLocale(String),

    /// 外部引擎凭证未配置，属于部署配置错误而非瞬时故障
    #[error("LINGO_API_KEY is not configured.")]
    ServiceUnavailable,

    /// 服务端引擎调用超时
    #[error("Translation timed out.")]
    Timeout,

    /// 外部引擎报告的失败，消息原样透传
    #[error("{0}")]
    EngineError(String),

    /// 客户端整体往返超时，与服务端上报的错误可区分
    #[error("Translation request timed out.")]
    RequestTimeout,

    /// 客户端网络层失败（超时除外）
    #[error("{0}")]
    NetworkError(String),
}

impl TranslationError {
    /// 映射到 HTTP 状态码
    ///
    /// 客户端侧的两个变体不会跨越处理器边界，这里按惯例归入 500。
    pub fn status_code(&self) -> u16 {
        match self {
            TranslationError::InvalidRequest
            | TranslationError::MissingText
            | TranslationError::UnsupportedLocale(_) => 400,
            TranslationError::ServiceUnavailable => 503,
            TranslationError::Timeout
            | TranslationError::EngineError(_)
            | TranslationError::RequestTimeout
            | TranslationError::NetworkError(_) => 500,
        }
    }

    /// 是否为请求方可修复的输入错误
    pub fn is_client_fault(&self) -> bool {
        self.status_code() == 400
    }
}

impl From<tokio::time::error::Elapsed> for TranslationError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        TranslationError::Timeout
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
