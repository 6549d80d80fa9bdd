//! 翻译 API 处理器

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use serde_json::Value;

use crate::translation::TranslationError;
use crate::web::types::{AppState, ErrorResponse, TranslateResponse};

/// 把翻译错误映射为 HTTP 响应
fn error_response(error: TranslationError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// `POST /api/translate`
///
/// 请求体按原始字节读取后自行解析：axum 内建的 JSON 拒绝响应
/// 不符合本接口 `{"error": ...}` 的错误格式。
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let raw: Value =
        serde_json::from_slice(&body).map_err(|_| error_response(TranslationError::InvalidRequest))?;

    match state.service.handle(&raw).await {
        Ok(translated_text) => Ok(Json(TranslateResponse { translated_text })),
        Err(error) => Err(error_response(error)),
    }
}
