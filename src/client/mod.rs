//! 客户端模块
//!
//! 运行时翻译管线的调用方：`dispatcher` 负责带超时的 HTTP
//! 调度，`history` 负责把每次尝试写入有界的本地审计日志。

pub mod dispatcher;
pub mod history;

pub use dispatcher::{ClientConfig, TranslationClient};
pub use history::{
    FileStorage, HistoryEntry, HistoryLog, HistoryStatus, HistoryStorage, MemoryStorage,
    HISTORY_LIMIT, STORAGE_KEY,
};
