//! 发布就绪检查处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};
use chrono::{SecondsFormat, Utc};

use crate::locales::Locale;
use crate::web::types::{AppState, ReleaseReadinessResponse};

/// 上线前必须配置的目标语言
const REQUIRED_TARGET_LOCALES: [&str; 3] = ["es", "de", "ar"];

/// `GET /api/release-readiness`
///
/// 汇报已配置的语言集合和运行时翻译凭证状态，供发布检查单使用。
pub async fn release_readiness(
    State(state): State<Arc<AppState>>,
) -> Json<ReleaseReadinessResponse> {
    Json(ReleaseReadinessResponse {
        checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        configured_locales: Locale::ALL.iter().map(|l| l.code().to_string()).collect(),
        has_runtime_api_key: state.service.has_credential(),
        required_target_locales: REQUIRED_TARGET_LOCALES
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}
