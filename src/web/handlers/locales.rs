//! 语言区域列表处理器

use axum::response::Json;

use crate::locales::Locale;
use crate::web::types::LocaleInfo;

/// `GET /api/locales`
///
/// 返回受支持语言的元数据，客户端据此渲染选择器，
/// 不需要在前端硬编码注册表。
pub async fn list_locales() -> Json<Vec<LocaleInfo>> {
    Json(Locale::ALL.iter().copied().map(LocaleInfo::from_locale).collect())
}
