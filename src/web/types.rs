//! Web 模块的数据类型定义

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::locales::Locale;
use crate::translation::TranslationService;

/// 应用状态
///
/// 翻译服务在进程启动时创建一次，所有请求共享同一个实例。
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
}

/// 翻译请求体
///
/// 仅用于文档和客户端序列化；服务端按原始 JSON 解析，
/// 以便对缺失或类型错误的字段做宽松回退。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_locale: Option<String>,
}

/// 翻译成功响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 发布就绪检查响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseReadinessResponse {
    pub checked_at: String,
    pub configured_locales: Vec<String>,
    pub has_runtime_api_key: bool,
    pub required_target_locales: Vec<String>,
}

/// 语言区域信息条目
#[derive(Debug, Serialize, Deserialize)]
pub struct LocaleInfo {
    pub code: String,
    pub label: String,
    pub direction: String,
    pub currency: String,
}

impl LocaleInfo {
    pub fn from_locale(locale: Locale) -> Self {
        Self {
            code: locale.code().to_string(),
            label: locale.label().to_string(),
            direction: locale.direction().as_str().to_string(),
            currency: locale.currency().to_string(),
        }
    }
}
